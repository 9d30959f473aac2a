use anyhow::Result;

use userlist::consts::{ENV_ATOMIC_UPSERT, ENV_INITIAL_CAPACITY, ENV_MATCH_MODE, ENV_MAX_RECORDS};
use userlist::{AllocationError, MatchMode, Record, StoreBuilder, StoreConfig, UserList};

#[test]
fn defaults_follow_reference_behavior() {
    let cfg = StoreConfig::default();
    assert_eq!(cfg.max_records, None);
    assert_eq!(cfg.match_mode, MatchMode::Prefix);
    assert!(!cfg.atomic_upsert);
    assert_eq!(cfg.initial_capacity, 16);

    let list = UserList::new();
    assert_eq!(list.config().match_mode, MatchMode::Prefix);
}

#[test]
fn env_overrides_and_builder_wins_over_env() {
    // единственный тест в этом бинаре, который трогает ENV
    std::env::set_var(ENV_MAX_RECORDS, "3");
    std::env::set_var(ENV_MATCH_MODE, "exact");
    std::env::set_var(ENV_ATOMIC_UPSERT, "yes");
    std::env::set_var(ENV_INITIAL_CAPACITY, "not-a-number");

    let cfg = StoreConfig::from_env();
    assert_eq!(cfg.max_records, Some(3));
    assert_eq!(cfg.match_mode, MatchMode::Exact);
    assert!(cfg.atomic_upsert);
    assert_eq!(cfg.initial_capacity, 16, "bad value keeps the default");

    let list = UserList::builder()
        .max_records(None)
        .match_mode(MatchMode::Prefix)
        .build();
    assert_eq!(list.config().max_records, None);
    assert_eq!(list.config().match_mode, MatchMode::Prefix);
    assert!(list.config().atomic_upsert, "untouched field comes from env");

    std::env::set_var(ENV_MATCH_MODE, "fuzzy");
    assert_eq!(StoreConfig::from_env().match_mode, MatchMode::Prefix);

    for k in [ENV_MAX_RECORDS, ENV_MATCH_MODE, ENV_ATOMIC_UPSERT, ENV_INITIAL_CAPACITY] {
        std::env::remove_var(k);
    }
}

#[test]
fn fluent_setters_compose() {
    let cfg = StoreConfig::default()
        .with_max_records(Some(10))
        .with_match_mode(MatchMode::Exact)
        .with_atomic_upsert(true)
        .with_initial_capacity(0);
    let list = UserList::with_config(cfg);
    assert_eq!(list.config().max_records, Some(10));
    assert_eq!(list.config().initial_capacity, 0);
    assert!(list.is_empty());
}

#[test]
fn capacity_limit_yields_allocation_error_and_no_change() -> Result<()> {
    let list = StoreBuilder::from_default().max_records(Some(2)).build();
    list.add_tail(Record::new("a", 1))?;
    list.add_head(Record::new("b", 2))?;

    for res in [
        list.add_tail(Record::new("c", 3)),
        list.add_head(Record::new("d", 4)),
    ] {
        let err = res.unwrap_err();
        let alloc = err
            .downcast_ref::<AllocationError>()
            .expect("must be an AllocationError");
        assert!(matches!(alloc, AllocationError::CapacityReached { max: 2 }));
    }

    assert_eq!(list.len(), 2);
    assert_eq!(list.records(), vec![Record::new("b", 2), Record::new("a", 1)]);

    // освободили место -> вставка снова проходит
    assert_eq!(list.delete(&Record::new("a", 1)), 1);
    list.add_tail(Record::new("c", 3))?;
    assert_eq!(list.len(), 2);
    Ok(())
}

#[test]
fn zero_capacity_store_rejects_everything() {
    let list = StoreBuilder::from_default().max_records(Some(0)).build();
    assert!(list.add_tail(Record::new("a", 1)).is_err());
    assert!(list.update(Record::new("a", 1)).is_err());
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
}
