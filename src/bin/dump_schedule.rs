//! Dump the generated bulletin text for one plan.
//!
//! Usage: cargo run --bin dump_schedule -- --service-type 12345 --plan 67890

use bulletinflow::config::Config;
use bulletinflow::constants::aggregation::SERVICE_PLANS_PER_PAGE;
use bulletinflow::copyright;
use bulletinflow::hymnal::HymnIndex;
use bulletinflow::planning_center::{PlanningCenterClient, SortOrder};
use bulletinflow::session::ScheduleSession;
use bulletinflow::types::{PlanId, ServiceTypeId};

fn arg_value(name: &str) -> Option<String> {
    std::env::args()
        .position(|a| a == name)
        .and_then(|i| std::env::args().nth(i + 1))
}

#[tokio::main]
async fn main() {
    let Some(service_type_id) = arg_value("--service-type") else {
        eprintln!("Missing required --service-type <id>");
        std::process::exit(2);
    };
    let Some(plan_id) = arg_value("--plan") else {
        eprintln!("Missing required --plan <id>");
        std::process::exit(2);
    };

    let config = Config::load().expect("Failed to load config");
    let client = PlanningCenterClient::new(&config);
    let service_type_id = ServiceTypeId::new(service_type_id);
    let plan_id = PlanId::new(plan_id);

    let (service_types, _) = client
        .get_service_types()
        .await
        .expect("Failed to fetch service types");
    let service_type_name = service_types
        .iter()
        .find(|st| st.id == service_type_id.as_str())
        .map(|st| st.name.clone())
        .unwrap_or_default();

    let (plans, _) = client
        .get_plans(&service_type_id, SortOrder::Descending, SERVICE_PLANS_PER_PAGE)
        .await
        .expect("Failed to fetch plans");
    let sort_date = plans
        .iter()
        .find(|p| p.id == plan_id.as_str())
        .map(|p| p.sort_date.clone())
        .unwrap_or_default();

    let page = client
        .get_plan_items(&service_type_id, &plan_id)
        .await
        .expect("Failed to fetch plan items");

    let hymns = if config.hymnal_path.is_file() {
        HymnIndex::load(&config.hymnal_path).expect("Failed to load hymnal table")
    } else {
        HymnIndex::default()
    };

    let song_titles: Vec<String> = page
        .items
        .iter()
        .filter(|item| item.is_song())
        .map(|item| item.title.clone())
        .collect();
    let matched = hymns.lookup_batch(&song_titles);

    println!("=== Copyright Information ===\n");
    println!("{}\n", copyright::plan_copyright_text(&page.items, &page.included));

    let session = ScheduleSession::new(page.items, matched);
    println!("=== Service Schedule ===\n");
    println!("{}", session.schedule_text(&service_type_name, &sort_date));
}
