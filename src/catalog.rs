//! Field catalog for the product relation.
//!
//! The catalog is the whitelist of attribute names a structured query may
//! reference. Only names that resolve here ever reach SQL text.

use chrono::NaiveDate;

use crate::error::{LumenError, Result};
use crate::query::{FilterClause, FilterValue, Operator, SqlArg, StructuredQuery};

/// Date format accepted for date-valued filters.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Type of a single-valued column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Text,
    Number,
    Date,
}

/// Value kind of a catalog field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A native scalar column.
    Scalar(ScalarType),
    /// A JSONB array of strings.
    StringList,
}

impl FieldKind {
    /// Returns true for list-valued fields.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::StringList)
    }

    /// Returns the column type of the stored relation.
    pub fn sql_type(&self) -> &'static str {
        match self {
            Self::Scalar(ScalarType::Text) => "VARCHAR",
            Self::Scalar(ScalarType::Number) => "REAL",
            Self::Scalar(ScalarType::Date) => "DATE",
            Self::StringList => "JSONB",
        }
    }
}

/// A queryable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

const fn text(name: &'static str, description: &'static str) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Scalar(ScalarType::Text),
        description,
    }
}

const fn number(name: &'static str, description: &'static str) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Scalar(ScalarType::Number),
        description,
    }
}

const fn date(name: &'static str, description: &'static str) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::Scalar(ScalarType::Date),
        description,
    }
}

const fn list(name: &'static str, description: &'static str) -> FieldDef {
    FieldDef {
        name,
        kind: FieldKind::StringList,
        description,
    }
}

const PRODUCT_FIELDS: &[FieldDef] = &[
    text("name", "Produktname"),
    list("anwendungs_gebiete", "Anwendungsgebiete"),
    list("vorteile", "Vorteile"),
    list("eigenschaften", "Eigenschaften"),
    number("nenn_strom_a", "Nennstrom in Ampere"),
    number("strom_steuer_a_min", "Stromsteuerbereich Minimum in Ampere"),
    number("stroem_steuer_a_max", "Stromsteuerbereich Maximum in Ampere"),
    number("nenn_leistung_w", "Nennleistung in Watt"),
    number("nenn_spannung_v", "Nennspannung in Volt"),
    number("durchmesser_mm", "Durchmesser in mm"),
    number("laenge_mm", "Länge in mm"),
    number(
        "laenge_mit_sockel_mm",
        "Länge mit Sockel jedoch ohne Sockelstift in mm",
    ),
    number("lcl_mm", "Abstand Lichtschwerpunkt (LCL) in mm"),
    number("kabel_laenge_mm", "Kabel-/Leitungslänge, Eingangsseite in mm"),
    number("elekroden_abstand_mm", "Elektrodenabstand kalt in mm"),
    number("produkt_gewicht_g", "Produktgewicht in Gramm"),
    number(
        "max_umgebungsgtemperatur_c",
        "Maximale Umgebungstemperatur in Grad Celsius",
    ),
    number("lebensdauer_h", "Lebensdauer in Stunden"),
    text("sockel_anode", "Sockel Anode (Normbezeichnung)"),
    text("sockel_kathode", "Sockel Kathode (Normbezeichnung)"),
    text("kuehlung", "Kühlung"),
    text("brennstellung", "Brennstellung"),
    date("deklarations_datum", "Datum der Deklaration (YYYY-MM-DD)"),
    list("erzeugniss_nummern", "Primäre Erzeugnisnummern"),
    text("stoff", "Stoff der Kandidatenliste"),
    text("stoff_cas_nummer", "CAS-Nummer des Stoffes"),
    list("scip_nummern", "SCIP Deklarationsnummern"),
    text("ean", "EAN"),
    text("metel_code", "METEL-Code"),
    text("seg_no", "SEG-No."),
    text("stk_nummer", "STK-Nummer"),
    text("uk_org", "UK-Org."),
];

/// The catalog of the lighting product relation.
pub static PRODUCT_CATALOG: FieldCatalog =
    FieldCatalog::new("product_data", "name", PRODUCT_FIELDS);

/// The fixed set of queryable attributes of a single relation.
#[derive(Debug)]
pub struct FieldCatalog {
    relation: &'static str,
    primary_field: &'static str,
    fields: &'static [FieldDef],
}

impl FieldCatalog {
    /// Creates a catalog over the given relation and fields.
    pub const fn new(
        relation: &'static str,
        primary_field: &'static str,
        fields: &'static [FieldDef],
    ) -> Self {
        Self {
            relation,
            primary_field,
            fields,
        }
    }

    /// Returns the target relation.
    pub fn relation(&self) -> &'static str {
        self.relation
    }

    /// Returns the field that identifies a record to a reader.
    pub fn primary_field(&self) -> &'static str {
        self.primary_field
    }

    /// Returns all fields in declaration order.
    pub fn fields(&self) -> &'static [FieldDef] {
        self.fields
    }

    /// Looks up a field by name.
    pub fn lookup(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the kind of a field, or `InvalidQuery` if the name is unknown.
    pub fn kind_of(&self, name: &str) -> Result<FieldKind> {
        self.lookup(name)
            .map(|f| f.kind)
            .ok_or_else(|| LumenError::invalid_query(format!("unknown field '{name}'")))
    }

    /// Checks every field, operator, and value of a query against the catalog.
    pub fn validate(&self, query: &StructuredQuery) -> Result<()> {
        self.check_return_fields(&query.return_fields)?;
        for clause in &query.filters {
            self.resolve_filter(clause)?;
        }
        Ok(())
    }

    /// Checks that the projection is non-empty and only names catalog fields.
    pub fn check_return_fields(&self, return_fields: &[String]) -> Result<()> {
        if return_fields.is_empty() {
            return Err(LumenError::invalid_query("return_fields must not be empty"));
        }
        for name in return_fields {
            self.kind_of(name)?;
        }
        Ok(())
    }

    /// Resolves a filter clause to the field kind and the bound argument.
    ///
    /// List fields only support `eq`, which tests membership of a string.
    pub fn resolve_filter(&self, clause: &FilterClause) -> Result<(FieldKind, SqlArg)> {
        let kind = self.kind_of(&clause.field)?;

        let arg = match (kind, &clause.value) {
            (FieldKind::StringList, FilterValue::Text(s)) => {
                if clause.operator != Operator::Eq {
                    return Err(LumenError::invalid_query(format!(
                        "operator '{}' is not supported on list field '{}', only 'eq'",
                        clause.operator, clause.field
                    )));
                }
                SqlArg::Text(s.clone())
            }
            (FieldKind::Scalar(ScalarType::Text), FilterValue::Text(s)) => SqlArg::Text(s.clone()),
            (FieldKind::Scalar(ScalarType::Number), FilterValue::Number(n)) => {
                SqlArg::Real(*n as f32)
            }
            (FieldKind::Scalar(ScalarType::Date), FilterValue::Text(s)) => {
                let date = NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| {
                    LumenError::invalid_query(format!(
                        "field '{}' expects a date as YYYY-MM-DD, got {:?}",
                        clause.field, s
                    ))
                })?;
                SqlArg::Date(date)
            }
            (kind, value) => {
                return Err(LumenError::invalid_query(format!(
                    "field '{}' ({}) cannot be compared with a {}",
                    clause.field,
                    kind.sql_type(),
                    value.type_name()
                )));
            }
        };

        Ok((kind, arg))
    }

    /// Formats the catalog for inclusion in an LLM system prompt.
    pub fn format_for_llm(&self) -> String {
        let column_lines = self
            .fields
            .iter()
            .map(|field| {
                let list_note = if field.kind.is_list() {
                    ", list of strings"
                } else {
                    ""
                };
                format!(
                    "  - {}: {} ({}{})\n",
                    field.name,
                    field.kind.sql_type(),
                    field.description,
                    list_note
                )
            })
            .collect::<Vec<_>>()
            .join("");

        format!("Table: {}\n{}", self.relation, column_lines)
    }
}
