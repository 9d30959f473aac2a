use anyhow::{Context, Result};
use serde_json::{json, Value};

use userlist::{Record, Upsert, UserList};

const DEMO_RECORDS: u8 = 5;

/// Collects steps: plain lines on stdout, or one JSON object at the end.
struct Report {
    json: bool,
    steps: Vec<Value>,
}

impl Report {
    fn header(&self, title: &str) {
        if !self.json {
            println!("-------------{}-------------", title);
        }
    }

    fn step(&mut self, step: Value, line: String) {
        if self.json {
            self.steps.push(step);
        } else {
            println!("{}", line);
        }
    }
}

pub fn exec(json: bool) -> Result<()> {
    let list = UserList::from_env();
    let mut rep = Report {
        json,
        steps: Vec::new(),
    };

    rep.header("init user list");
    rep.step(
        json!({ "step": "init", "config": list.config().to_string() }),
        String::new(),
    );

    show_len(&list, &mut rep);
    show_presence(&list, &mut rep, "name_0");

    rep.header("insert data to user list tail");
    for i in 0..DEMO_RECORDS {
        let rec = Record::new(&format!("name_{}", i), i * 10);
        list.add_tail(rec)
            .with_context(|| format!("add_node_to_tail {:?}", rec))?;
        rep.step(
            json!({ "step": "add_tail", "record": rec }),
            format!("insert data, name:[{}], age: {}", rec.name(), rec.age()),
        );
    }

    show_len(&list, &mut rep);
    show_all(&list, &mut rep)?;
    show_presence(&list, &mut rep, "name_0");
    let captured = show_info(&list, &mut rep, "name_0");

    rep.header("update node name_0 age to 100");
    let target = captured.unwrap_or_else(|| Record::new("name_0", 0)).with_age(100);
    let outcome = list.update(target).context("update node name_0 age")?;
    rep.step(
        json!({ "step": "update", "record": target, "outcome": upsert_str(outcome) }),
        format!("update {}: {}", target, upsert_str(outcome)),
    );

    // после update ищем заново: delete удаляет ровно то, что сейчас лежит в списке
    let captured = show_info(&list, &mut rep, "name_0");

    rep.header("delete node name_0");
    let victim = captured.unwrap_or_default();
    let removed = list.delete(&victim);
    rep.step(
        json!({ "step": "delete", "record": victim, "removed": removed }),
        format!("removed {} node(s)", removed),
    );

    show_all(&list, &mut rep)?;
    show_len(&list, &mut rep);

    rep.header("delete all node");
    let removed = list.delete_all();
    rep.step(
        json!({ "step": "delete_all", "removed": removed }),
        format!("removed {} node(s)\n", removed),
    );

    show_len(&list, &mut rep);

    if rep.json {
        let out = json!({
            "steps": rep.steps,
            "metrics": userlist::metrics_snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(())
}

fn upsert_str(u: Upsert) -> String {
    match u {
        Upsert::Updated(n) => format!("updated {} node(s)", n),
        Upsert::Inserted => "inserted".to_string(),
    }
}

fn show_len(list: &UserList, rep: &mut Report) {
    rep.header("get user list len");
    let len = list.len();
    rep.step(
        json!({ "step": "len", "len": len, "is_empty": list.is_empty() }),
        format!("user_list_len = {}\n", len),
    );
}

fn show_presence(list: &UserList, rep: &mut Report, name: &str) {
    rep.header(&format!("find node {}", name));
    let found = list.contains(name);
    let line = if found {
        format!("find node {}\n", name)
    } else {
        format!("not found node {}\n", name)
    };
    rep.step(json!({ "step": "contains", "name": name, "found": found }), line);
}

fn show_info(list: &UserList, rep: &mut Report, name: &str) -> Option<Record> {
    rep.header(&format!("get node {} info", name));
    let found = list.find(name);
    let line = match found {
        Some(r) => format!("node {} info, name: [{}], age: {}\n", name, r.name(), r.age()),
        None => format!("get node {} info fail\n", name),
    };
    rep.step(json!({ "step": "find", "name": name, "record": found }), line);
    found
}

fn show_all(list: &UserList, rep: &mut Report) -> Result<()> {
    rep.header("show all node data");
    if rep.json {
        rep.steps
            .push(json!({ "step": "traverse", "records": list.records() }));
    } else {
        list.traverse_to(&mut std::io::stdout().lock())?;
        println!();
    }
    Ok(())
}
