/// cardex API walkthrough
///
/// Demonstrates the major engine operations:
/// - schema definition with index declarations
/// - insert / edit / delete
/// - fullmatch, prefix, boolean, and range queries
/// - the thread-safe store facade and schema export
use cardex::{Atom, FieldType, IndexKind, Query, Schema, Store, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Step 1: define a schema with two indexed columns
    let schema = Schema::new("files")
        .column("path", FieldType::Str)
        .column("owner", FieldType::Str)
        .column("size", FieldType::UInt)
        .index("path", IndexKind::Prefix)
        .index("owner", IndexKind::Fullmatch);

    let store = Store::new();
    let files = store.create(schema)?;
    println!("created collection 'files'");

    // Step 2: insert records
    {
        let mut files = files.write();
        files.insert(vec![
            Value::from("/tmp/report.txt"),
            Value::from("alice"),
            Value::UInt(1024),
        ])?;
        files.insert(vec![
            Value::from("/tmp/notes.md"),
            Value::from("bob"),
            Value::UInt(256),
        ])?;
        files.insert(vec![
            Value::from("/var/log/syslog"),
            Value::from("alice"),
            Value::UInt(4096),
        ])?;
        println!("inserted {} records", files.len());
    }

    // Step 3: query through the indexes
    {
        let files = files.read();

        let tmp = files.filter(&Query::prefix("path", "/tmp"))?;
        println!("path starts with /tmp: {} hits", tmp.len());

        let alices = files.filter(&Query::fullmatch("owner", "alice"))?;
        println!("owned by alice: {} hits", alices.len());

        let big_alice = files.filter(&Query::and(vec![
            Query::fullmatch("owner", "alice"),
            Query::range("size", Some(Value::UInt(2048)), None),
        ]))?;
        println!("alice's files >= 2048 bytes: {} hits", big_alice.len());

        let not_bob = files.filter(&Query::not(Atom::fullmatch("owner", "bob")))?;
        println!("not owned by bob: {} hits", not_bob.len());
    }

    // Step 4: edit and delete keep the indexes in step
    {
        let mut files = files.write();
        let (id, _) = files.filter(&Query::fullmatch("owner", "bob"))?[0].clone();
        files.edit(id, 1, Value::from("carol"))?;
        files.delete(id)?;
        println!("after edit + delete: {} records", files.len());
    }

    // Step 5: export the schema (rows are never serialized)
    let json = files.read().schema().to_json()?;
    println!("schema export: {json}");

    let stats = files.read().stats();
    println!(
        "stats: {} records, {} indexes",
        stats.record_count,
        stats.indexes.len()
    );

    Ok(())
}
