//! Unit tests for qs-resource.

use qs_core::{EntityId, PoolId, QsError, SimTime};

use crate::{Grant, PoolRegistry, RegistryError, Request, ResourcePool};

fn t(x: f64) -> SimTime {
    SimTime::new(x).unwrap()
}

fn pool(capacity: i64) -> ResourcePool {
    ResourcePool::new(PoolId(0), "desk", capacity).unwrap()
}

fn granted(r: Request) -> Grant {
    match r {
        Request::Granted(g) => g,
        Request::Queued { ahead } => panic!("expected grant, queued behind {ahead}"),
    }
}

#[cfg(test)]
mod pool_tests {
    use super::*;

    #[test]
    fn capacity_must_be_positive() {
        assert_eq!(
            ResourcePool::new(PoolId(0), "x", 0).unwrap_err(),
            QsError::InvalidCapacity(0)
        );
        assert_eq!(
            ResourcePool::new(PoolId(0), "x", -3).unwrap_err(),
            QsError::InvalidCapacity(-3)
        );
    }

    #[test]
    fn grants_until_full_then_queues() {
        let mut p = pool(2);
        let _a = granted(p.request(EntityId(0), t(0.0)));
        let _b = granted(p.request(EntityId(1), t(0.0)));
        assert_eq!(p.in_use(), 2);
        assert_eq!(p.available(), 0);
        assert_eq!(p.request(EntityId(2), t(0.0)), Request::Queued { ahead: 0 });
        assert_eq!(p.request(EntityId(3), t(0.0)), Request::Queued { ahead: 1 });
        assert_eq!(p.queue_length(), 2);
        assert!(p.is_waiting(EntityId(3)));
    }

    #[test]
    fn release_hands_slot_to_queue_head() {
        let mut p = pool(1);
        let a = granted(p.request(EntityId(0), t(0.0)));
        p.request(EntityId(1), t(1.0));
        p.request(EntityId(2), t(2.0));

        let next = p.release(a, t(5.0)).unwrap().expect("head is granted");
        assert_eq!(next.entity(), EntityId(1));
        assert_eq!(next.granted_at(), t(5.0));
        assert_eq!(p.in_use(), 1);
        assert_eq!(p.queue_length(), 1);

        let next = p.release(next, t(9.0)).unwrap().expect("head is granted");
        assert_eq!(next.entity(), EntityId(2));
        assert_eq!(p.release(next, t(12.0)).unwrap(), None);
        assert_eq!(p.in_use(), 0);
    }

    #[test]
    fn free_slot_is_not_taken_past_waiters() {
        // The released slot goes to the waiter, so a newcomer arriving at the
        // same instant still finds the pool full.
        let mut p = pool(2);
        let a = granted(p.request(EntityId(0), t(0.0)));
        let _b = granted(p.request(EntityId(1), t(0.0)));
        p.request(EntityId(2), t(1.0));
        let c = p.release(a, t(2.0)).unwrap().unwrap();
        assert_eq!(c.entity(), EntityId(2));
        assert_eq!(p.request(EntityId(3), t(2.0)), Request::Queued { ahead: 0 });
    }

    #[test]
    fn release_of_foreign_grant_is_not_held() {
        let mut desk = pool(1);
        let mut other = ResourcePool::new(PoolId(1), "doctor", 1).unwrap();
        let foreign = granted(other.request(EntityId(0), t(0.0)));
        let err = desk.release(foreign, t(1.0)).unwrap_err();
        assert_eq!(err, QsError::NotHeld { pool: PoolId(0), grant: 0 });
        assert_eq!(desk.in_use(), 0);
    }

    #[test]
    fn release_of_same_id_from_other_pool_is_rejected_even_when_ids_collide() {
        let mut desk = pool(1);
        let _mine = granted(desk.request(EntityId(0), t(0.0)));
        let mut other = ResourcePool::new(PoolId(1), "doctor", 1).unwrap();
        let theirs = granted(other.request(EntityId(5), t(0.0)));
        assert_eq!(theirs.id(), 0);
        assert!(desk.release(theirs, t(1.0)).is_err());
        assert_eq!(desk.in_use(), 1);
    }

    #[test]
    fn withdraw_removes_waiter_only() {
        let mut p = pool(1);
        let _a = granted(p.request(EntityId(0), t(0.0)));
        p.request(EntityId(1), t(0.0));
        p.request(EntityId(2), t(0.0));
        assert!(p.withdraw(EntityId(1), t(3.0)));
        assert!(!p.withdraw(EntityId(1), t(3.0)));
        assert!(!p.withdraw(EntityId(0), t(3.0)), "holder is not a waiter");
        assert_eq!(p.queue_length(), 1);
    }

    #[test]
    fn monitor_time_average_and_max() {
        let mut p = pool(1);
        let a = granted(p.request(EntityId(0), t(0.0)));
        p.request(EntityId(1), t(2.0)); // len 1 from t=2
        p.request(EntityId(2), t(4.0)); // len 2 from t=4
        let b = p.release(a, t(6.0)).unwrap().unwrap(); // len 1 from t=6
        let _c = p.release(b, t(8.0)).unwrap().unwrap(); // len 0 from t=8
        // area = 1*2 + 2*2 + 1*2 = 8 over [0, 10]
        assert!((p.monitor().time_average(t(10.0)) - 0.8).abs() < 1e-12);
        assert_eq!(p.monitor().max_len(), 2);
        assert_eq!(p.monitor().time_average(SimTime::ZERO), 0.0);
        assert_eq!(p.grants_issued(), 3);
    }
}

#[cfg(test)]
mod registry_tests {
    use super::*;

    #[test]
    fn declare_and_resolve() {
        let mut r = PoolRegistry::new();
        let reg = r.declare("registration", 2).unwrap();
        let doc = r.declare("doctors", 4).unwrap();
        assert_eq!(r.resolve("registration").unwrap(), reg);
        assert_eq!(r.resolve("doctors").unwrap(), doc);
        assert_eq!(r[doc].capacity(), 4);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn unknown_pool_is_rejected() {
        let r = PoolRegistry::new();
        assert_eq!(
            r.resolve("new_patient").unwrap_err(),
            RegistryError::UnknownPool("new_patient".into())
        );
    }

    #[test]
    fn duplicate_and_invalid_declarations() {
        let mut r = PoolRegistry::new();
        r.declare("doctors", 4).unwrap();
        assert_eq!(
            r.declare("doctors", 5).unwrap_err(),
            RegistryError::DuplicatePool("doctors".into())
        );
        assert_eq!(
            r.declare("nurses", 0).unwrap_err(),
            RegistryError::Core(QsError::InvalidCapacity(0))
        );
        assert!(r.resolve("nurses").is_err());
    }
}
