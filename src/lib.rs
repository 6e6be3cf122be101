//! Workspace root package. Hosts the pre-commit hooks; the code lives under
//! `crates/`.
