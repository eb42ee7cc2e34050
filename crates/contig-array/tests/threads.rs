//! Integration test: arrays cross thread boundaries by value and are
//! shareable by reference.

use std::thread;

use contig_array::DynArray;
use crossbeam_channel::bounded;

#[test]
fn array_round_trips_through_worker() {
    let (to_worker, worker_rx) = bounded::<DynArray<u64>>(1);
    let (to_main, main_rx) = bounded::<DynArray<u64>>(1);

    let worker = thread::spawn(move || {
        for mut array in worker_rx {
            let sum: u64 = array.iter().sum();
            array.push(sum).unwrap();
            to_main.send(array).unwrap();
        }
    });

    for round in 1..=4u64 {
        let array = DynArray::from_elem(round as usize, &round).unwrap();
        to_worker.send(array).unwrap();
        let back = main_rx.recv().unwrap();
        assert_eq!(back.len(), round as usize + 1);
        assert_eq!(back.back().copied().unwrap(), round * round);
    }

    drop(to_worker);
    worker.join().unwrap();
}

#[test]
fn shared_reads_from_scoped_threads() {
    let array = DynArray::from_slice(&(0..1_000u32).collect::<Vec<_>>()).unwrap();
    let (tx, rx) = bounded(4);

    thread::scope(|scope| {
        for chunk in 0..4usize {
            let tx = tx.clone();
            let array = &array;
            scope.spawn(move || {
                let part = &array[chunk * 250..(chunk + 1) * 250];
                tx.send(part.iter().map(|&v| u64::from(v)).sum::<u64>())
                    .unwrap();
            });
        }
    });
    drop(tx);

    let total: u64 = rx.iter().sum();
    assert_eq!(total, (0..1_000u64).sum::<u64>());
}
