//! `skyfare search`: fill the search form from flags, validate, run the
//! search and print the offers.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;

use skyfare_config::Config;
use skyfare_core::form::parse_date;
use skyfare_core::present::{CardSummary, TripSummary, card_summary};
use skyfare_core::{CabinClass, FlightOffer, LocationField, SearchForm, Session, TripType};

use crate::cli::{CabinArg, GlobalOpts, OutputFormat, SearchArgs, TripArg};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct OfferRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Airline")]
    airline: String,
    #[tabled(rename = "Route")]
    route: String,
    #[tabled(rename = "Departs")]
    departs: String,
    #[tabled(rename = "Arrives")]
    arrives: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Stops")]
    stops: String,
}

/// Join one line per trip, for multi-trip offers.
fn per_trip(card: &CardSummary, f: impl Fn(&TripSummary) -> String) -> String {
    card.trips.iter().map(f).collect::<Vec<_>>().join("\n")
}

fn offer_row(index: usize, offer: &FlightOffer, color: bool) -> OfferRow {
    let card = card_summary(offer);
    OfferRow {
        index: index + 1,
        price: output::paint_price(&card.price, color),
        airline: per_trip(&card, |t| t.carrier.clone()),
        route: per_trip(&card, |t| {
            let route = format!("{} → {}", t.departure_airport, t.arrival_airport);
            if t.is_return {
                format!("{route} (return)")
            } else {
                route
            }
        }),
        departs: per_trip(&card, |t| format!("{} {}", t.departure_date, t.departure_time)),
        arrives: per_trip(&card, |t| format!("{} {}", t.arrival_date, t.arrival_time)),
        duration: per_trip(&card, |t| t.duration.clone()),
        stops: per_trip(&card, |t| output::paint_dim(&t.stops, color)),
    }
}

fn trip_type(arg: TripArg) -> TripType {
    match arg {
        TripArg::RoundTrip => TripType::RoundTrip,
        TripArg::OneWay => TripType::OneWay,
        TripArg::MultiCity => TripType::MultiCity,
    }
}

fn cabin(arg: CabinArg) -> CabinClass {
    match arg {
        CabinArg::Economy => CabinClass::Economy,
        CabinArg::PremiumEconomy => CabinClass::PremiumEconomy,
        CabinArg::Business => CabinClass::Business,
        CabinArg::First => CabinClass::First,
    }
}

/// Apply the flags to the form the same way the search screen would.
fn fill_form(form: &mut SearchForm, args: &SearchArgs) -> Result<(), CliError> {
    form.set_trip_type(trip_type(args.trip));

    let store = form.store();
    for (field, code) in [
        (LocationField::Origin, &args.from),
        (LocationField::Destination, &args.to),
    ] {
        let code = code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase);
        if let Some(ref c) = code {
            store.set_input(field, c.clone());
        }
        store.update_search_params(|p| p.set_code(field, code));
    }

    store.update_search_params(|p| {
        p.adults = args.adults;
        if let Some(class) = args.class {
            p.flight_class = Some(cabin(class));
        }
    });

    if let Some(ref raw) = args.depart {
        form.set_departure_date(parse_date(raw)?)?;
    }
    if let Some(ref raw) = args.return_date {
        form.set_return_date(parse_date(raw)?)?;
    }
    Ok(())
}

fn spinner(global: &GlobalOpts) -> Option<ProgressBar> {
    if global.quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Searching flights...");
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

pub async fn handle(
    session: &Session,
    args: SearchArgs,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut form = session.search_form();
    fill_form(&mut form, &args)?;
    let params = form.submit()?;

    let progress = spinner(global);
    let result = session.search(params).await;
    form.finish_search();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    result?;

    let view = session.results_view();
    let offers = view.offers();

    if matches!(global.output, OutputFormat::Table) {
        if let Some(empty) = view.empty_state() {
            if !global.quiet {
                eprintln!("{}", empty.message);
            }
            return Ok(());
        }
        if !global.quiet {
            let header = view.header();
            eprintln!("{}  {}  ({})", header.route, header.details, view.count_line());
        }
    }

    let color = match cfg.defaults.color.as_str() {
        "always" => true,
        "never" => false,
        _ => output::should_color(global.color),
    };
    let out = output::render_list(
        global.output,
        offers.as_slice(),
        |i, o| offer_row(i, o, color),
        |o| format!("{} {}", o.currency_code, o.total_price),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
