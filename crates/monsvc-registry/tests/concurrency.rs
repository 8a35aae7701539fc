use std::thread;

use monsvc_registry::Registry;
use monsvc_types::{MachineId, MachineRecord, Status};

const WRITERS: usize = 8;
const PER_WRITER: usize = 250;

#[test]
fn concurrent_creates_of_distinct_ids_are_all_kept() {
    let registry = Registry::new();

    thread::scope(|scope| {
        for writer in 0..WRITERS {
            let registry = registry.clone();
            scope.spawn(move || {
                for n in 0..PER_WRITER {
                    let id = MachineId::new(format!("w{writer}m{n}")).expect("id");
                    registry
                        .create(MachineRecord::new(id, Status::Init))
                        .expect("distinct id");
                }
            });
        }
        // Readers run alongside the writers.
        for _ in 0..2 {
            let registry = registry.clone();
            scope.spawn(move || {
                for _ in 0..PER_WRITER {
                    assert!(registry.get_all().len() <= WRITERS * PER_WRITER);
                }
            });
        }
    });

    assert_eq!(registry.len(), WRITERS * PER_WRITER);
    for writer in 0..WRITERS {
        for n in 0..PER_WRITER {
            let record = registry.get(&format!("w{writer}m{n}")).expect("kept");
            assert_eq!(record.status, Status::Init);
        }
    }
}

#[test]
fn racing_creates_of_one_id_register_it_once() {
    let registry = Registry::new();
    let id = MachineId::new("contested").expect("id");

    let accepted: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = registry.clone();
                let id = id.clone();
                scope.spawn(move || registry.create(MachineRecord::new(id, Status::Init)).is_ok())
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread") as usize)
            .sum()
    });

    assert_eq!(accepted, 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn concurrent_status_reports_never_lose_the_record() {
    let registry = Registry::new();
    let id = MachineId::new("abc").expect("id");
    registry
        .create(MachineRecord::new(id.clone(), Status::Init))
        .expect("create");

    thread::scope(|scope| {
        for (n, status) in Status::ALL.into_iter().enumerate() {
            let registry = registry.clone();
            let id = id.clone();
            scope.spawn(move || {
                let ip = format!("10.0.0.{n}").parse().expect("ip");
                for _ in 0..200 {
                    registry
                        .update_status(&id, status, Some(ip))
                        .expect("known id");
                }
            });
        }
    });

    assert_eq!(registry.len(), 1);
    let record = registry.get("abc").expect("registered");
    let n = Status::ALL
        .iter()
        .position(|s| *s == record.status)
        .expect("recognized status");
    // Status and ip are written together under one lock.
    assert_eq!(record.ip, Some(format!("10.0.0.{n}").parse().expect("ip")));
}
