use anyhow::Result;

use userlist::{Record, Upsert, UserList};

/// Полный сценарий: init → len → find → 5 вставок → traverse → find →
/// update → delete → delete_all.
#[test]
fn smoke_reference_sequence() -> Result<()> {
    let list = UserList::new();

    // 1) пустой список
    assert_eq!(list.len(), 0);
    assert!(list.is_empty());
    assert!(!list.contains("name_0"));

    // 2) вставка в хвост
    for i in 0..5u8 {
        list.add_tail(Record::new(&format!("name_{}", i), i * 10))?;
    }
    assert_eq!(list.len(), 5);
    assert!(!list.is_empty());

    // 3) обход в порядке вставки
    let mut out = Vec::new();
    list.traverse_to(&mut out)?;
    let text = String::from_utf8(out)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "user list data, name: [name_0], age = 0");
    assert_eq!(lines[4], "user list data, name: [name_4], age = 40");

    // 4) find с захватом
    let got = list.find("name_0").expect("name_0 must exist");
    assert_eq!(got, Record::new("name_0", 0));

    // 5) update name_0 -> 100
    let outcome = list.update(got.with_age(100))?;
    assert_eq!(outcome, Upsert::Updated(1));
    let got = list.find("name_0").expect("name_0 must still exist");
    assert_eq!(got.age(), 100);
    assert_eq!(list.len(), 5);

    // 6) delete по полному значению
    assert_eq!(list.delete(&got), 1);
    assert_eq!(list.len(), 4);
    assert!(!list.contains("name_0"));
    let names: Vec<String> = list.records().iter().map(|r| r.name().into_owned()).collect();
    assert_eq!(names, vec!["name_1", "name_2", "name_3", "name_4"]);

    // 7) delete_all
    assert_eq!(list.delete_all(), 4);
    assert_eq!(list.len(), 0);
    assert!(list.is_empty());
    Ok(())
}

#[test]
fn insert_then_find() -> Result<()> {
    let list = UserList::new();
    for i in 0..5u8 {
        list.add_tail(Record::new(&format!("name_{}", i), i * 10))?;
    }
    let got = list.find("name_3").expect("name_3 must be found");
    assert_eq!(got.age(), 30);
    assert_eq!(got.name(), "name_3");
    Ok(())
}

#[test]
fn head_insertion_reverses_order() -> Result<()> {
    let list = UserList::new();
    for i in 0..3u8 {
        list.add_head(Record::new(&format!("h{}", i), i))?;
    }
    list.add_tail(Record::new("t", 9))?;
    let ages: Vec<u8> = list.records().iter().map(|r| r.age()).collect();
    assert_eq!(ages, vec![2, 1, 0, 9]);
    Ok(())
}

#[test]
fn reset_releases_everything() -> Result<()> {
    let list = UserList::new();
    for i in 0..10u8 {
        list.add_tail(Record::new("x", i))?;
    }
    list.reset();
    assert_eq!(list.len(), 0);
    assert!(list.is_empty());
    assert!(list.records().is_empty());

    // после reset список снова полностью рабочий
    list.add_tail(Record::new("y", 1))?;
    assert_eq!(list.records(), vec![Record::new("y", 1)]);
    Ok(())
}

#[test]
fn panicking_traversal_leaves_store_usable() -> Result<()> {
    let list = std::sync::Arc::new(UserList::new());
    list.add_tail(Record::new("a", 1))?;

    let l2 = list.clone();
    let joined = std::thread::spawn(move || {
        l2.traverse(|_| panic!("callback blew up"));
    })
    .join();
    assert!(joined.is_err());

    list.add_tail(Record::new("b", 2))?;
    assert_eq!(list.len(), 2);
    assert_eq!(list.records().len(), 2);
    Ok(())
}
