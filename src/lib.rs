// Library root
// -----------
// This crate exposes the lookup logic behind the `population-generator`
// binary. The binary (`main.rs`) wires configuration and the CLI to these
// modules.
//
// Module responsibilities:
// - `states`: Fixed two-letter code -> FIPS code table.
// - `api`: Talks to the census API (URL building, fetch, response parsing).
// - `query`: The command handler both entry points converge on.
// - `input` / `output`: CSV reading of a query and writing of a result.
// - `config`: API key and base URL resolution.
// - `ui`: The interactive terminal form.
pub mod api;
pub mod config;
pub mod input;
pub mod output;
pub mod query;
pub mod states;
pub mod ui;
