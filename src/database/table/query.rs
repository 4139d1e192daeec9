use crate::model::person::Person;

use super::table::PersonTable;

#[tracing::instrument(level = "debug", skip(table))]
pub fn first_by_name(table: &PersonTable, name: &str) -> Option<Person> {
    // Rows are keyed by id, so the first match is the earliest inserted one
    table
        .person_rows
        .values()
        .find(|person| person.name == name)
        .cloned()
}

#[tracing::instrument(level = "debug", skip(table))]
pub fn lowest_id(table: &PersonTable) -> Option<Person> {
    table
        .person_rows
        .first_key_value()
        .map(|(_, person)| person.clone())
}

#[tracing::instrument(level = "debug", skip(table))]
pub fn list(table: &PersonTable) -> Vec<Person> {
    table.person_rows.values().cloned().collect()
}
