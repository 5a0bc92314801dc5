//! Shared setup for integration tests.
//!
//! Every client gets its own single-connection pool holding a temporary
//! `product_data` table, so tests never touch persistent data.

use lumen_ask::db::PostgresClient;
use sqlx::postgres::PgPoolOptions;

const CREATE_TABLE: &str = r#"
CREATE TEMP TABLE product_data (
    name VARCHAR,
    anwendungs_gebiete JSONB,
    vorteile JSONB,
    eigenschaften JSONB,
    nenn_leistung_w REAL,
    nenn_strom_a REAL,
    produkt_gewicht_g REAL,
    lebensdauer_h REAL,
    kuehlung VARCHAR,
    deklarations_datum DATE,
    erzeugniss_nummern JSONB,
    scip_nummern JSONB,
    ean VARCHAR
)"#;

const SEED_ROWS: &str = r#"
INSERT INTO product_data
    (name, anwendungs_gebiete, vorteile, eigenschaften, nenn_leistung_w, nenn_strom_a,
     produkt_gewicht_g, lebensdauer_h, kuehlung, deklarations_datum, erzeugniss_nummern,
     scip_nummern, ean)
VALUES
    ('XBO 2500 W/HS XL OFR', '["Kinoprojektion"]', '["Hohe Leuchtdichte"]', '[]',
     2500, 47.3, 571, 3000, 'Forciert', '2023-03-01',
     '["4008321082206"]', '["SCIP-2500"]', '4008321082206'),
    ('XBO 3000 W/HTP XL OFR', '["Kinoprojektion"]', '[]', '[]',
     3000, 100, 640, 3500, 'Forciert', '2023-06-15',
     '["4008321082213", "4050300333090"]', '[]', '4008321082213'),
    ('XBO 4000 W/HTP XL OFR', '["Kinoprojektion"]', '[]', '[]',
     4000, 135, 800, 4000, 'Forciert', '2024-01-10',
     '["4008321082220"]', NULL, '4008321082220'),
    ('XBO 1000 W/HS OFR', '["Mikroskopie"]', '[]', '[]',
     1000, 40.1, 290, 3000.3, 'Konvektion', NULL,
     '["4008321082237"]', '[]', NULL)
"#;

/// Helper to get test database URL from environment.
pub fn get_test_database_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

/// Creates a client whose session holds a seeded `product_data` table.
pub async fn seeded_client() -> Option<PostgresClient> {
    let url = get_test_database_url()?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .ok()?;

    sqlx::query(CREATE_TABLE).execute(&pool).await.ok()?;
    sqlx::query(SEED_ROWS).execute(&pool).await.ok()?;

    Some(PostgresClient::from_pool(pool))
}
