//! Model to entity mappers
//!
//! Text columns holding enums are parsed here; a value the domain does not
//! recognise is reported as a database error rather than silently defaulted.

mod character;
mod guild;
mod membership;
mod user;

use roster_core::DomainError;

fn corrupt_column(column: &str, value: &str) -> DomainError {
    DomainError::DatabaseError(format!("Unrecognised {column} value '{value}'"))
}
