//! Query execution integration tests.
//!
//! Runs structured queries against a seeded `product_data` table.

use lumen_ask::catalog::PRODUCT_CATALOG;
use lumen_ask::db::{DatabaseClient, Value};
use lumen_ask::error::LumenError;
use lumen_ask::query::{FilterClause, Operator, QueryExecutor, QueryOutput, StructuredQuery};

use super::fixtures::seeded_client;

fn names(output: &QueryOutput) -> Vec<String> {
    let QueryOutput::Many(rows) = output else {
        panic!("Expected many rows, got {:?}", output);
    };
    rows.iter()
        .map(|row| match row.get("name") {
            Some(Value::String(name)) => name.clone(),
            other => panic!("Expected name, got {:?}", other),
        })
        .collect()
}

#[tokio::test]
async fn test_query_one_returns_weight() {
    let Some(client) = seeded_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let executor = QueryExecutor::new(&client, &PRODUCT_CATALOG, 1000);
    let query = StructuredQuery::one(
        vec![FilterClause::new("name", Operator::Eq, "XBO 2500 W/HS XL OFR")],
        &["name", "produkt_gewicht_g"],
    );

    let output = executor.execute(&query).await.unwrap();

    let QueryOutput::One(row) = output else {
        panic!("Expected a single row");
    };
    assert_eq!(row.get("name"), Some(&Value::from("XBO 2500 W/HS XL OFR")));
    assert_eq!(row.get("produkt_gewicht_g"), Some(&Value::Float(571.0)));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_query_many_with_numeric_filters() {
    let Some(client) = seeded_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let executor = QueryExecutor::new(&client, &PRODUCT_CATALOG, 1000);
    let query = StructuredQuery::many(
        vec![
            FilterClause::new("lebensdauer_h", Operator::Gt, 3000),
            FilterClause::new("nenn_leistung_w", Operator::Gte, 1500),
        ],
        &["name", "lebensdauer_h", "nenn_leistung_w"],
    );

    let output = executor.execute(&query).await.unwrap();

    let mut found = names(&output);
    found.sort();
    assert_eq!(
        found,
        vec!["XBO 3000 W/HTP XL OFR", "XBO 4000 W/HTP XL OFR"]
    );

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_fractional_numbers_match_real_columns() {
    let Some(client) = seeded_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let executor = QueryExecutor::new(&client, &PRODUCT_CATALOG, 1000);

    let exact = StructuredQuery::one(
        vec![FilterClause::new("nenn_strom_a", Operator::Eq, 47.3)],
        &["name", "nenn_strom_a"],
    );
    let QueryOutput::One(row) = executor.execute(&exact).await.unwrap() else {
        panic!("Expected a single row");
    };
    assert_eq!(row.get("name"), Some(&Value::from("XBO 2500 W/HS XL OFR")));

    let at_most = StructuredQuery::many(
        vec![FilterClause::new("lebensdauer_h", Operator::Lte, 3000.3)],
        &["name"],
    );
    let mut found = names(&executor.execute(&at_most).await.unwrap());
    found.sort();
    assert_eq!(found, vec!["XBO 1000 W/HS OFR", "XBO 2500 W/HS XL OFR"]);

    let above = StructuredQuery::many(
        vec![FilterClause::new("lebensdauer_h", Operator::Gt, 3000.3)],
        &["name"],
    );
    let mut found = names(&executor.execute(&above).await.unwrap());
    found.sort();
    assert_eq!(
        found,
        vec!["XBO 3000 W/HTP XL OFR", "XBO 4000 W/HTP XL OFR"]
    );

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_list_containment_and_decoding() {
    let Some(client) = seeded_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let executor = QueryExecutor::new(&client, &PRODUCT_CATALOG, 1000);
    let query = StructuredQuery::one(
        vec![FilterClause::new("erzeugniss_nummern", Operator::Eq, "4050300333090")],
        &["name", "erzeugniss_nummern", "scip_nummern"],
    );

    let QueryOutput::One(row) = executor.execute(&query).await.unwrap() else {
        panic!("Expected a single row");
    };

    assert_eq!(row.get("name"), Some(&Value::from("XBO 3000 W/HTP XL OFR")));
    assert_eq!(
        row.get("erzeugniss_nummern"),
        Some(&Value::List(vec![
            "4008321082213".to_string(),
            "4050300333090".to_string()
        ]))
    );
    assert_eq!(row.get("scip_nummern"), Some(&Value::List(vec![])));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_null_list_column_stays_null() {
    let Some(client) = seeded_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let executor = QueryExecutor::new(&client, &PRODUCT_CATALOG, 1000);
    let query = StructuredQuery::one(
        vec![FilterClause::new("name", Operator::Eq, "XBO 4000 W/HTP XL OFR")],
        &["name", "scip_nummern"],
    );

    let QueryOutput::One(row) = executor.execute(&query).await.unwrap() else {
        panic!("Expected a single row");
    };

    assert_eq!(row.get("scip_nummern"), Some(&Value::Null));
    client.close().await.unwrap();
}

#[tokio::test]
async fn test_date_filter() {
    let Some(client) = seeded_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let executor = QueryExecutor::new(&client, &PRODUCT_CATALOG, 1000);
    let query = StructuredQuery::many(
        vec![FilterClause::new("deklarations_datum", Operator::Gte, "2023-06-01")],
        &["name", "deklarations_datum"],
    );

    let output = executor.execute(&query).await.unwrap();

    let mut found = names(&output);
    found.sort();
    assert_eq!(
        found,
        vec!["XBO 3000 W/HTP XL OFR", "XBO 4000 W/HTP XL OFR"]
    );
    assert!(output.to_json().unwrap().contains("\"2023-06-15\""));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_query_one_not_found() {
    let Some(client) = seeded_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let executor = QueryExecutor::new(&client, &PRODUCT_CATALOG, 1000);
    let query = StructuredQuery::one(
        vec![FilterClause::new("name", Operator::Eq, "x' OR '1'='1")],
        &["name"],
    );

    let error = executor.execute(&query).await.unwrap_err();

    assert!(matches!(error, LumenError::NotFound(_)));
    client.close().await.unwrap();
}

#[tokio::test]
async fn test_query_one_conflict() {
    let Some(client) = seeded_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let executor = QueryExecutor::new(&client, &PRODUCT_CATALOG, 1000);
    let query = StructuredQuery::one(
        vec![FilterClause::new("kuehlung", Operator::Eq, "Forciert")],
        &["name"],
    );

    let error = executor.execute(&query).await.unwrap_err();

    assert!(matches!(error, LumenError::Conflict(_)));
    client.close().await.unwrap();
}

#[tokio::test]
async fn test_query_many_empty_and_truncated() {
    let Some(client) = seeded_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let executor = QueryExecutor::new(&client, &PRODUCT_CATALOG, 1000);
    let empty = StructuredQuery::many(
        vec![FilterClause::new("lebensdauer_h", Operator::Gt, 100_000)],
        &["name"],
    );
    assert_eq!(
        executor.execute(&empty).await.unwrap(),
        QueryOutput::Many(vec![])
    );

    let limited = QueryExecutor::new(&client, &PRODUCT_CATALOG, 2);
    let all = StructuredQuery::many(vec![], &["name"]);
    assert_eq!(limited.execute(&all).await.unwrap().row_count(), 2);

    client.close().await.unwrap();
}
