use anyhow::Result;

use userlist::{metrics_snapshot, Record, StoreBuilder, UserList};

// Метрики глобальные на процесс: один тест на бинарь, сравниваем дельты.
#[test]
fn counters_track_operations() -> Result<()> {
    let before = metrics_snapshot();

    let list = UserList::new();
    list.add_head(Record::new("a", 1))?;
    list.add_tail(Record::new("b", 2))?;
    list.add_tail(Record::new("ab", 3))?;
    assert!(list.find("a").is_some());
    assert!(list.find("zzz").is_none());
    list.update(Record::new("a", 9))?; // a и ab
    list.update(Record::new("c", 4))?; // вставка
    list.traverse(|_| {});
    assert_eq!(list.delete(&Record::new("b", 2)), 1);
    assert_eq!(list.delete_all(), 3);
    list.reset();

    let capped = StoreBuilder::from_default().max_records(Some(0)).build();
    assert!(capped.add_tail(Record::new("x", 1)).is_err());

    let after = metrics_snapshot();
    assert_eq!(after.inserts_head - before.inserts_head, 1);
    assert_eq!(after.inserts_tail - before.inserts_tail, 3);
    assert_eq!(after.inserts_total() - before.inserts_total(), 4);
    assert_eq!(after.alloc_failures - before.alloc_failures, 1);
    assert_eq!(after.finds_total - before.finds_total, 2);
    assert_eq!(after.finds_hit - before.finds_hit, 1);
    assert_eq!(after.updates_total - before.updates_total, 2);
    assert_eq!(after.updated_nodes - before.updated_nodes, 2);
    assert_eq!(after.upsert_inserts - before.upsert_inserts, 1);
    assert_eq!(after.deleted_nodes - before.deleted_nodes, 4);
    assert_eq!(after.delete_all_runs - before.delete_all_runs, 1);
    assert_eq!(after.resets - before.resets, 1);
    assert!(after.traversals - before.traversals >= 1);

    let json = serde_json::to_value(&after)?;
    assert!(json.get("inserts_head").is_some());
    Ok(())
}
