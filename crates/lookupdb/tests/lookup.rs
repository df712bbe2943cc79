use lookupdb::{Error, LookupError, core::index::IndexSchema, prelude::*};
use std::{collections::BTreeMap, sync::Arc};

const CATALOG: &str = r#"
[[databases]]
name = "shop"

[[databases.tables]]
name = "orders"

[[databases.tables.indexes]]
name = "by_status_total"
columns = [{ name = "status", tag = 2 }, { name = "total", tag = 3 }]
primary_key = [{ name = "id", tag = 1 }]
"#;

const STATUSES: [&str; 3] = ["new", "paid", "shipped"];

fn order(id: i64) -> (String, i64) {
    let status = STATUSES[usize::try_from(id).expect("id fits") % STATUSES.len()];
    (status.to_string(), id * 10)
}

fn key(values: impl IntoIterator<Item = Value>) -> Tuple {
    Tuple::new(TupleFormat::V2, values)
}

fn scanner(_: &IndexSchema) -> Result<Arc<dyn KeyScanner>, Error> {
    let keys = (0..30).map(|id| {
        let (status, total) = order(id);
        key([Value::Text(status), Value::Int(total), Value::Int(id)])
    });

    Ok(Arc::new(MemoryKeyStore::new(keys)?))
}

fn index() -> IndexHandle {
    let catalog = CatalogConfig::from_toml_str(CATALOG).expect("catalog should parse");
    let driver = IndexDriver::from_config(&catalog, scanner).expect("driver should build");

    Arc::clone(&driver.load_all("Shop", "Orders")[0])
}

fn ids(lookup: &IndexLookup) -> Vec<i64> {
    lookup
        .key_iter()
        .map(|values| match values.expect("scan should succeed").get(&1) {
            Some(Value::Int(id)) => *id,
            other => panic!("unexpected id {other:?}"),
        })
        .collect()
}

#[test]
fn planner_combines_predicates_into_one_lookup() {
    let index = index();
    let text = |s: &str| Value::Text(s.to_string());

    // status = 'paid' AND total >= 100
    let paid = IndexLookup::new(
        Arc::clone(&index),
        vec![LookupOp::greater_than_or_equal_less_than_or_equal(
            key([text("paid"), Value::Int(100)]),
            key([text("paid")]),
        )],
    )
    .expect("lookup should bind");

    // status = 'new'
    let fresh = IndexLookup::new(Arc::clone(&index), vec![LookupOp::equals(key([text("new")]))])
        .expect("lookup should bind");

    let either = paid.union(&[&fresh]).expect("same index");

    assert_eq!(either.ops().len(), 2);
    assert_eq!(
        ids(&either),
        [10, 13, 16, 19, 22, 25, 28, 0, 3, 6, 9, 12, 15, 18, 21, 24, 27]
    );
}

#[test]
fn rows_come_back_through_the_materializer() {
    let index = index();
    let table: BTreeMap<i64, (String, i64)> = (0..30).map(|id| (id, order(id))).collect();

    let shipped = IndexLookup::new(
        index,
        vec![LookupOp::equals(key([Value::Text("shipped".to_string())]))],
    )
    .expect("lookup should bind");

    let rows: Vec<(String, i64)> = shipped
        .row_iter(|values: &TaggedValues| -> Result<Option<(String, i64)>, Error> {
            let Some(Value::Int(id)) = values.get(&1) else {
                return Ok(None);
            };
            Ok(table.get(id).cloned())
        })
        .collect::<Result<_, _>>()
        .expect("rows should load");

    assert_eq!(rows.len(), 10);
    assert!(rows.iter().all(|(status, _)| status == "shipped"));
}

#[test]
fn lookups_on_different_indexes_do_not_merge() {
    let first = IndexLookup::new(index(), vec![LookupOp::all(TupleFormat::V2)])
        .expect("lookup should bind");
    let second = IndexLookup::new(index(), vec![LookupOp::all(TupleFormat::V2)])
        .expect("lookup should bind");

    let err = first.intersection(&[&second]).unwrap_err();

    assert!(matches!(
        err.lookup_error(),
        Some(LookupError::WrongIndex { .. })
    ));
}
