//! `skyfare locations <KEYWORD>`: one pass of the autocomplete flow.

use tabled::Tabled;

use skyfare_core::{LocationField, LocationSuggestion, LookupOutcome, Session, SuggestionKind};

use crate::cli::{FieldArg, GlobalOpts, LocationsArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "IATA")]
    iata: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
}

fn suggestion_row(_index: usize, s: &LocationSuggestion) -> SuggestionRow {
    let (name, kind) = match s.kind {
        SuggestionKind::Group => (s.name.clone(), "city"),
        // Nested airports are indented under their group
        SuggestionKind::Airport => (format!("  {}", s.name), "airport"),
    };
    SuggestionRow {
        iata: s.iata.clone(),
        name,
        kind,
    }
}

fn field(arg: FieldArg) -> LocationField {
    match arg {
        FieldArg::Origin => LocationField::Origin,
        FieldArg::Destination => LocationField::Destination,
    }
}

pub async fn handle(
    session: &Session,
    args: LocationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let field = field(args.field);
    let autocomplete = session.autocomplete();

    let Some(outcome) = autocomplete.update(field, &args.keyword).await else {
        return Err(CliError::KeywordTooShort {
            keyword: args.keyword,
            min: autocomplete.min_keyword_len(),
        });
    };

    match outcome {
        LookupOutcome::Applied { count } => tracing::debug!(count, "suggestions received"),
        LookupOutcome::Superseded => {}
        LookupOutcome::Failed(e) => return Err(e.into()),
    }

    let suggestions = session.store().suggestions(field);
    if suggestions.is_empty() && matches!(global.output, OutputFormat::Table) {
        if !global.quiet {
            eprintln!("No locations match '{}'", args.keyword);
        }
        return Ok(());
    }

    let out = output::render_list(
        global.output,
        suggestions.as_slice(),
        suggestion_row,
        |s| s.iata.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
