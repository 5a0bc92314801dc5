//! End-to-end pipeline tests with a mock model and a real store.

use std::sync::Arc;

use lumen_ask::config::QueryConfig;
use lumen_ask::llm::MockLlmClient;
use lumen_ask::pipeline::Pipeline;
use tokio_util::sync::CancellationToken;

use super::fixtures::seeded_client;

#[tokio::test]
async fn test_answer_weight_question() {
    let Some(client) = seeded_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let llm = Arc::new(
        MockLlmClient::new()
            .with_response("db result", "The XBO 2500 W/HS XL OFR weighs 571 grams.")
            .with_response(
                "weight",
                r#"{"query":{"type":"one","where":[{"field":"name","op":"eq","value":"XBO 2500 W/HS XL OFR"}],"return_fields":["produkt_gewicht_g"]}}"#,
            ),
    );
    let pipeline = Pipeline::from_clients(llm.clone(), Box::new(client), &QueryConfig::default());

    let answer = pipeline
        .answer(
            "What is the weight of XBO 2500 W/HS XL OFR?",
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(answer.query.return_fields, vec!["name", "produkt_gewicht_g"]);
    assert_eq!(
        answer.result_json,
        r#"{"name":"XBO 2500 W/HS XL OFR","produkt_gewicht_g":571.0}"#
    );
    assert_eq!(answer.text, "The XBO 2500 W/HS XL OFR weighs 571 grams.");
    assert_eq!(llm.requests().len(), 2);

    pipeline.close().await.unwrap();
}

#[tokio::test]
async fn test_answer_list_question() {
    let Some(client) = seeded_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let llm = Arc::new(MockLlmClient::new().with_response(
        "mikroskopie",
        r#"{"query":{"type":"many","where":[{"field":"anwendungs_gebiete","op":"eq","value":"Mikroskopie"}],"return_fields":["name","anwendungs_gebiete"]}}"#,
    ));
    let pipeline = Pipeline::from_clients(llm, Box::new(client), &QueryConfig::default());

    let answer = pipeline
        .answer(
            "Which lamps are used for Mikroskopie?",
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(
        answer.result_json,
        r#"[{"name":"XBO 1000 W/HS OFR","anwendungs_gebiete":["Mikroskopie"]}]"#
    );

    pipeline.close().await.unwrap();
}
