// Entry point and menu flow.
//
// The CLI reworks the original dashboard into a console session:
// - Option [1] loads and normalizes the principals CSV.
// - Option [2] renders the dashboard (summary, breakdown table, chart
//   points) for an optional search term and exports the views.
// - Option [3] switches between the two credit-terms axis policies.
mod axis;
mod output;
mod parser;
mod reports;
mod types;
mod util;

use axis::AxisPolicy;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use types::{PrincipalRecord, RecordFilter, SortKey, SortOrder};

const DEFAULT_DATA_PATH: &str = "principals.csv";
const BREAKDOWN_FILE: &str = "breakdown.csv";
const CHART_POINTS_FILE: &str = "chart_points.csv";
const SUMMARY_FILE: &str = "summary.json";
const NARRATIVE_FILE: &str = "narrative_payload.json";
const PREVIEW_ROWS: usize = 10;

// Loaded records plus the selected axis policy, kept across menu turns
// so the CSV is only read once per session.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        data: None,
        policy: AxisPolicy::default(),
    })
});

struct AppState {
    data: Option<Vec<PrincipalRecord>>,
    policy: AxisPolicy,
}

/// Print a prompt and read one trimmed line from stdin.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn read_choice() -> String {
    read_line("Enter choice: ")
}

/// Map a column name typed at the prompt to its sort key; anything
/// unrecognized falls back to the revenue default.
fn sort_key_for(choice: &str) -> SortKey {
    match choice {
        "name" => SortKey::Name,
        "margin" => SortKey::Margin,
        "terms" => SortKey::CreditTerms,
        "barrier" => SortKey::Barrier,
        _ => SortKey::Revenue,
    }
}

/// Ask whether to return to the menu after a dashboard run.
fn prompt_back_to_menu() -> bool {
    loop {
        match read_line("Back to menu (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load and normalize a principals CSV.
fn handle_load() {
    let entered = read_line(&format!("CSV path (blank for {}): ", DEFAULT_DATA_PATH));
    let path = if entered.is_empty() {
        DEFAULT_DATA_PATH.to_string()
    } else {
        entered
    };
    match parser::load_principals(&path) {
        Ok((data, report)) => {
            println!(
                "Loaded {} of {} data rows from {}.",
                util::format_int(report.parsed_rows as i64),
                util::format_int(report.total_rows as i64),
                path
            );
            if report.skipped_rows > 0 {
                println!(
                    "Note: {} malformed rows skipped.",
                    util::format_int(report.skipped_rows as i64)
                );
            }
            println!();
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(data);
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Handle option [2]: render the dashboard views and export them.
///
/// Side-effectful on purpose: prints the summary and both tables, and
/// writes two CSV files plus the JSON summary.
fn handle_dashboard() {
    let (data, policy) = {
        let state = APP_STATE.lock().unwrap();
        (state.data.clone(), state.policy)
    };
    let Some(data) = data else {
        println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
        return;
    };

    let query = read_line("Search principals (blank for all): ");
    let mut filter = RecordFilter::default();
    if !query.is_empty() {
        filter.name_query = Some(query);
    }
    let sort_input =
        read_line("Sort by [name|margin|terms|revenue|barrier], append ' asc' to flip (blank for revenue): ")
            .to_lowercase();
    let (key_input, order) = match sort_input.strip_suffix(" asc") {
        Some(k) => (k.trim_end(), SortOrder::Ascending),
        None => (sort_input.as_str(), SortOrder::Descending),
    };
    let key = sort_key_for(key_input);

    let mut visible = reports::filter_records(&data, &filter);
    reports::sort_records(&mut visible, key, order);

    let stats = reports::portfolio_summary(&visible);
    println!();
    println!(
        "Portfolio: {} principals, ${} total revenue, {}% average margin",
        util::format_int(stats.total_principals as i64),
        util::format_number(stats.total_revenue, 0),
        util::format_number(stats.avg_margin, 1)
    );
    println!(
        "High-barrier principals: {}; immediate-terms (COD/PIA): {}\n",
        stats.high_barrier_count, stats.immediate_terms_count
    );

    println!("Detailed Breakdown\n");
    let breakdown = reports::breakdown_rows(&visible);
    output::preview_table(&breakdown, PREVIEW_ROWS);
    if let Err(e) = output::write_csv(BREAKDOWN_FILE, &breakdown) {
        eprintln!("Write error: {}", e);
    }
    println!("(Full table exported to {})\n", BREAKDOWN_FILE);

    println!("Quadrant Mapping ({} axis)\n", policy.name());
    let points = reports::chart_points(&visible, policy);
    output::preview_table(&reports::chart_point_rows(&points), PREVIEW_ROWS);
    let guide: Vec<String> = policy
        .ticks()
        .iter()
        .map(|t| format!("{}={}", t, policy.tick_label(*t)))
        .collect();
    println!("Axis ticks: {}", guide.join("  "));
    if let Err(e) = output::write_csv(CHART_POINTS_FILE, &points) {
        eprintln!("Write error: {}", e);
    }
    println!("(Chart data exported to {})\n", CHART_POINTS_FILE);

    if let Err(e) = output::write_json(SUMMARY_FILE, &stats) {
        eprintln!("Write error: {}", e);
    }
    // Hand-off file for the narrative-summary service; generating the
    // commentary itself happens outside this program.
    if let Err(e) = output::write_json(NARRATIVE_FILE, &reports::summary_payload(&visible)) {
        eprintln!("Write error: {}", e);
    }
    println!(
        "Summary stats written to {}; narrative payload to {}.\n",
        SUMMARY_FILE, NARRATIVE_FILE
    );
}

/// Handle option [3]: flip between the two axis policies.
fn handle_policy_switch() {
    let mut state = APP_STATE.lock().unwrap();
    state.policy = match state.policy {
        AxisPolicy::OutlierBand => AxisPolicy::OffsetAfterImmediate,
        AxisPolicy::OffsetAfterImmediate => AxisPolicy::OutlierBand,
    };
    println!("Axis policy set to: {}\n", state.policy.name());
}

fn main() {
    loop {
        println!("Principal Strategy Report");
        println!("[1] Load the file");
        println!("[2] Show dashboard");
        println!("[3] Switch axis policy\n");
        match read_choice().as_str() {
            "1" => handle_load(),
            "2" => {
                println!();
                handle_dashboard();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            "3" => handle_policy_switch(),
            _ => println!("Invalid choice. Please enter 1, 2 or 3.\n"),
        }
    }
}
