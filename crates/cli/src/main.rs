mod config;

use access_scope::{AccessScope, SessionUser, TeamDirectory, resolve_accessible_owner_ids};
use anyhow::{Context, Result, bail};
use ats_records::{ActivityEvent, Candidate, JobPosting, Record, RecordIndex};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::{ColoredString, Colorize};
use config::{FileConfig, Overrides, Settings};
use pipeline::{
    CalendarClassifier, CountBreakdown, DateBucket, DateRangeClassifier, EventDimension, Facet,
    Field, FilterCriteria, JobStatusSummary, StatusTone, compile_predicate_with, compute_counts,
    Page, group_by, paginate, status_info_or_default,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// ats-filter - record visibility and filtering for an applicant tracking system
#[derive(Parser)]
#[command(name = "ats-filter")]
#[command(about = "Filter candidates and job postings the way a recruiter sees them", long_about = None)]
struct Cli {
    /// Path to the dataset directory (users.json, candidates.json, ...)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Path to a TOML config file (defaults to ./ats-filter.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Id of the user the view is rendered for
    #[arg(short = 'u', long)]
    as_user: String,

    /// Reference day for date-range filters (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the candidates visible to the user
    Candidates(ListArgs),

    /// List the job postings visible to the user
    Jobs(ListArgs),

    /// Show which owners the user may see
    Scope,

    /// Show a percentage breakdown of visible records
    Breakdown {
        /// Dimension to break down by
        #[arg(long, value_enum, default_value = "status")]
        by: BreakdownBy,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show active vs filled counts for the visible job postings
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Args)]
struct ListArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Group results by date, client, job, recruiter or job-type
    #[arg(long)]
    group_by: Option<Facet>,

    /// Page to show (1-based); ignored with --group-by
    #[arg(long, default_value = "1")]
    page: usize,

    /// Records per page (overrides the config file)
    #[arg(long)]
    page_size: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args, Default)]
struct FilterArgs {
    /// URL query string to pre-populate criteria (jobId, jobTitle, skills, searchTerm)
    #[arg(long)]
    query: Option<String>,

    /// Free-text search over name, email, title, organization and skills
    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    country: Option<String>,

    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    salary_min: Option<f64>,

    #[arg(long)]
    salary_max: Option<f64>,

    #[arg(long)]
    experience: Option<String>,

    /// Skill to match (repeatable; any one matching is enough)
    #[arg(long = "skill")]
    skills: Vec<String>,

    #[arg(long)]
    status: Option<String>,

    #[arg(long)]
    priority: Option<String>,

    #[arg(long)]
    source: Option<String>,

    #[arg(long)]
    job_type: Option<String>,

    /// today, this-week, this-month, this-quarter, this-year or all
    #[arg(long)]
    date_range: Option<String>,
}

impl FilterArgs {
    /// Build criteria: the query string first, then explicit flags on top.
    fn into_criteria(self) -> Result<FilterCriteria> {
        let mut criteria = self
            .query
            .as_deref()
            .map(FilterCriteria::from_query)
            .unwrap_or_default();

        if let Some(range) = &self.date_range {
            range
                .parse::<DateBucket>()
                .with_context(|| format!("Invalid --date-range '{range}'"))?;
        }

        if let Some(term) = self.search {
            criteria = criteria.with_search_term(term);
        }
        if !self.skills.is_empty() {
            criteria = criteria.with_skills(self.skills);
        }
        if let Some(experience) = self.experience {
            criteria = criteria.with_experience(experience);
        }
        if let Some(range) = self.date_range {
            criteria = criteria.with_date_range(range);
        }
        if self.salary_min.is_some() || self.salary_max.is_some() {
            criteria = criteria.with_salary_range(self.salary_min, self.salary_max);
        }

        let fields = [
            (Field::Country, self.country),
            (Field::City, self.city),
            (Field::Status, self.status),
            (Field::Priority, self.priority),
            (Field::Source, self.source),
            (Field::JobType, self.job_type),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                criteria = criteria.with_field(field, value);
            }
        }
        Ok(criteria)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum BreakdownBy {
    Status,
    Device,
    Location,
    Action,
}

/// Everything a command needs once the dataset is loaded.
struct AppContext {
    index: RecordIndex,
    session: SessionUser,
    scope: AccessScope,
    classifier: Arc<dyn DateRangeClassifier>,
    settings: Settings,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = FileConfig::load(cli.config.as_deref())?;
    let page_size = match &cli.command {
        Commands::Candidates(args) | Commands::Jobs(args) => args.page_size,
        _ => None,
    };
    let settings = Settings::resolve(
        file_config,
        Overrides {
            data_dir: cli.data_dir.clone(),
            page_size,
            reference_date: cli.today,
        },
    );

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Progress goes to stderr so --json output stays clean
    eprintln!("Loading dataset from {}...", settings.data_dir.display());
    let start = Instant::now();
    let index = RecordIndex::load_from_dir(&settings.data_dir)
        .with_context(|| format!("Failed to load dataset from {}", settings.data_dir.display()))?;
    eprintln!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    if index.get_user(&cli.as_user).is_none() {
        tracing::warn!("User {} is not in the directory; no records will be visible", cli.as_user);
    }
    let session = SessionUser::from_users(&cli.as_user, index.users());
    let directory = TeamDirectory::from_index(&index);
    let scope = resolve_accessible_owner_ids(&session, &directory);

    let classifier: Arc<dyn DateRangeClassifier> = match settings.reference_date {
        Some(day) => Arc::new(CalendarClassifier::new(day)),
        None => Arc::new(CalendarClassifier::today()),
    };

    let ctx = AppContext {
        index,
        session,
        scope,
        classifier,
        settings,
    };

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Candidates(args) => {
            handle_list(&ctx, ctx.index.candidates(), args, print_candidate)?
        }
        Commands::Jobs(args) => handle_list(&ctx, ctx.index.jobs(), args, print_job)?,
        Commands::Scope => handle_scope(&ctx),
        Commands::Breakdown { by, filters } => handle_breakdown(&ctx, by, filters)?,
        Commands::Summary { filters } => handle_summary(&ctx, filters)?,
    }

    Ok(())
}

/// Handle the 'candidates' and 'jobs' commands
fn handle_list<R: Record + Serialize>(
    ctx: &AppContext,
    records: &[R],
    args: ListArgs,
    print_row: fn(&R),
) -> Result<()> {
    let criteria = args.filters.into_criteria()?;
    let pipeline = compile_predicate_with(&criteria, &ctx.scope, ctx.classifier.clone());
    let visible = pipeline.apply(records);

    if let Some(facet) = args.group_by {
        let groups = group_by(visible.iter().copied(), facet);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&groups)?);
            return Ok(());
        }
        println!(
            "{}",
            format!("{} records in {} groups by {}", visible.len(), groups.len(), facet.as_str())
                .bold()
                .blue()
        );
        for (key, members) in &groups {
            println!("\n{} ({})", key.bold(), members.len());
            for record in members {
                print_row(record);
            }
        }
        return Ok(());
    }

    let page = paginate(&visible, args.page, ctx.settings.page_size);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    println!("{}", page_header(&page, &ctx.session.id).bold().blue());
    for record in &page.items {
        print_row(record);
    }
    Ok(())
}

/// Counts come from the filtered result, never the raw dataset.
fn page_header<T>(page: &Page<T>, viewer: &str) -> String {
    format!(
        "{} of {} records visible to {} (page {}/{})",
        page.items.len(),
        page.total_items,
        viewer,
        page.page,
        page.total_pages
    )
}

/// Handle the 'scope' command
fn handle_scope(ctx: &AppContext) {
    println!(
        "{}",
        format!("Access scope for {} ({})", ctx.session.id, ctx.session.role)
            .bold()
            .blue()
    );
    match &ctx.scope {
        AccessScope::Unrestricted => println!("{}All owners (unrestricted)", "• ".green()),
        AccessScope::Owners(owners) => {
            for owner in owners {
                let name = ctx
                    .index
                    .get_user(owner)
                    .map(|u| u.name.as_str())
                    .unwrap_or("unknown user");
                println!("{}{} ({})", "• ".green(), owner, name);
            }
        }
    }
}

/// Handle the 'breakdown' command
fn handle_breakdown(ctx: &AppContext, by: BreakdownBy, filters: FilterArgs) -> Result<()> {
    let criteria = filters.into_criteria()?;
    if !matches!(by, BreakdownBy::Status) && !criteria.is_empty() {
        bail!("Filter flags only apply to --by status; event breakdowns are scoped by job ownership");
    }

    let (title, breakdown) = match by {
        BreakdownBy::Status => {
            let pipeline = compile_predicate_with(&criteria, &ctx.scope, ctx.classifier.clone());
            let visible = pipeline.apply(ctx.index.candidates());
            let breakdown = compute_counts(visible.iter().copied(), |c: &Candidate| c.status.clone());
            ("Candidates by status", breakdown)
        }
        BreakdownBy::Device => ("Activity by device", event_breakdown(ctx, EventDimension::Device)),
        BreakdownBy::Location => {
            ("Activity by location", event_breakdown(ctx, EventDimension::Location))
        }
        BreakdownBy::Action => ("Activity by action", event_breakdown(ctx, EventDimension::Action)),
    };

    print_breakdown(title, &breakdown);
    Ok(())
}

fn event_breakdown(ctx: &AppContext, dimension: EventDimension) -> CountBreakdown {
    pipeline::breakdown_events(visible_events(&ctx.index, &ctx.scope), dimension)
}

/// Events are visible when their job posting is; events with no job only
/// under an unrestricted scope.
fn visible_events<'a>(index: &'a RecordIndex, scope: &AccessScope) -> Vec<&'a ActivityEvent> {
    index
        .events()
        .iter()
        .filter(|event| event_visible(index, scope, event))
        .collect()
}

fn event_visible(index: &RecordIndex, scope: &AccessScope, event: &ActivityEvent) -> bool {
    if scope.is_unrestricted() {
        return true;
    }
    event
        .job_id
        .as_deref()
        .and_then(|id| index.get_job(id))
        .is_some_and(|job| scope.permits(&job.owner_id))
}

/// Handle the 'summary' command
fn handle_summary(ctx: &AppContext, filters: FilterArgs) -> Result<()> {
    let criteria = filters.into_criteria()?;
    let pipeline = compile_predicate_with(&criteria, &ctx.scope, ctx.classifier.clone());
    let visible = pipeline.apply(ctx.index.jobs());
    let summary = JobStatusSummary::from_jobs(visible.iter().copied());

    println!("{}", "Job postings".bold().blue());
    println!("{}Active: {}", "• ".green(), summary.active);
    println!("{}Filled: {}", "• ".cyan(), summary.filled);
    println!("{}Other: {}", "• ".normal(), summary.other);
    println!("{}Total: {}", "• ".normal(), summary.total);
    Ok(())
}

fn print_breakdown(title: &str, breakdown: &CountBreakdown) {
    println!("{}", format!("{} ({} total)", title, breakdown.total()).bold().blue());
    if breakdown.is_empty() {
        println!("  (no records)");
        return;
    }
    for row in breakdown.rows() {
        println!("  {:<24} {:>6} {:>6.1}%", row.category, row.count, row.percentage);
    }
}

fn print_candidate(candidate: &Candidate) {
    println!(
        "  {} {} <{}> {} @ {} [{}] {}",
        candidate.id.green(),
        candidate.name,
        candidate.email,
        candidate.title,
        candidate.organization,
        candidate.skills.join(", "),
        status_badge(&candidate.status)
    );
}

fn print_job(job: &JobPosting) {
    let salary = match (job.salary_min, job.salary_max) {
        (Some(min), Some(max)) => format!("{min:.0}-{max:.0}"),
        (Some(min), None) => format!("{min:.0}+"),
        (None, Some(max)) => format!("up to {max:.0}"),
        (None, None) => "salary n/a".to_string(),
    };
    println!(
        "  {} {} @ {} ({}, {}) {}",
        job.id.green(),
        job.title,
        job.organization,
        job.city,
        salary,
        status_badge(&job.status)
    );
}

fn status_badge(status: &str) -> ColoredString {
    if status.trim().is_empty() {
        return "-".dimmed();
    }
    let (label, tone) = status_info_or_default(status);
    match tone {
        StatusTone::Success => label.green(),
        StatusTone::Info => label.blue(),
        StatusTone::Warning => label.yellow(),
        StatusTone::Danger => label.red(),
        StatusTone::Neutral => label.normal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_query() {
        let args = FilterArgs {
            query: Some("searchTerm=john&skills=Go".to_string()),
            search: Some("jane".to_string()),
            status: Some("new".to_string()),
            ..FilterArgs::default()
        };
        let criteria = args.into_criteria().unwrap();
        assert_eq!(criteria.active_search_term(), Some("jane"));
        assert_eq!(criteria.active_skills(), vec!["Go"]);
        assert_eq!(criteria.active_field(Field::Status), Some("new"));
    }

    #[test]
    fn test_invalid_date_range_is_rejected() {
        let args = FilterArgs {
            date_range: Some("fortnight".to_string()),
            ..FilterArgs::default()
        };
        assert!(args.into_criteria().is_err());
    }

    fn event(id: &str, job_id: Option<&str>) -> ActivityEvent {
        ActivityEvent {
            id: id.to_string(),
            job_id: job_id.map(str::to_string),
            device: "mobile".to_string(),
            location: "USA".to_string(),
            action: "view".to_string(),
            occurred_at: "2024-05-15T09:00:00Z".to_string(),
        }
    }

    fn job(id: &str, owner: &str) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            owner_id: owner.to_string(),
            title: "Engineer".to_string(),
            organization: "Acme".to_string(),
            client_id: None,
            skills: vec![],
            country: String::new(),
            city: String::new(),
            experience: String::new(),
            salary_min: None,
            salary_max: None,
            status: "active".to_string(),
            priority: String::new(),
            source: String::new(),
            job_type: String::new(),
            posted_date: String::new(),
        }
    }

    fn create_event_index() -> RecordIndex {
        let mut index = RecordIndex::new();
        index.insert_job(job("j1", "r1"));
        index.insert_job(job("j2", "r2"));
        index.insert_event(event("e1", Some("j1")));
        index.insert_event(event("e2", Some("j2")));
        index.insert_event(event("e3", None));
        index.insert_event(event("e4", Some("j-missing")));
        index
    }

    fn event_ids<'a>(events: &[&'a ActivityEvent]) -> Vec<&'a str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_events_follow_job_visibility() {
        let index = create_event_index();
        let scope = AccessScope::owners(["r1"]);

        // e2 belongs to another owner's job, e3 has no job, e4's job is unknown
        assert_eq!(event_ids(&visible_events(&index, &scope)), vec!["e1"]);

        let nobody = AccessScope::owners(Vec::<String>::new());
        assert!(visible_events(&index, &nobody).is_empty());
    }

    #[test]
    fn test_unrestricted_scope_sees_all_events() {
        let index = create_event_index();
        let visible = visible_events(&index, &AccessScope::Unrestricted);
        assert_eq!(event_ids(&visible), vec!["e1", "e2", "e3", "e4"]);
    }

    #[test]
    fn test_event_breakdown_rejects_filter_flags() {
        let cli = Cli::try_parse_from([
            "ats-filter",
            "--as-user",
            "r1",
            "breakdown",
            "--by",
            "device",
            "--status",
            "new",
        ])
        .unwrap();
        let Commands::Breakdown { by, filters } = cli.command else {
            panic!("expected breakdown");
        };
        let ctx = AppContext {
            index: create_event_index(),
            session: SessionUser::new("r1", ats_records::Role::User),
            scope: AccessScope::owners(["r1"]),
            classifier: Arc::new(CalendarClassifier::today()),
            settings: Settings::resolve(FileConfig::default(), Overrides::default()),
        };
        assert!(handle_breakdown(&ctx, by, filters).is_err());
        assert!(handle_breakdown(&ctx, BreakdownBy::Device, FilterArgs::default()).is_ok());
    }

    #[test]
    fn test_page_header_counts_filtered_records() {
        let jobs = vec![job("j1", "r1"), job("j2", "r2"), job("j3", "r1")];
        let pipeline = compile_predicate_with(
            &FilterCriteria::new(),
            &AccessScope::owners(["r1"]),
            Arc::new(CalendarClassifier::today()),
        );
        let visible = pipeline.apply(&jobs);
        let page = paginate(&visible, 1, 1);

        assert_eq!(page_header(&page, "r1"), "1 of 2 records visible to r1 (page 1/2)");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "ats-filter",
            "--as-user",
            "m1",
            "candidates",
            "--skill",
            "react",
            "--skill",
            "go",
            "--group-by",
            "job",
        ])
        .unwrap();
        match cli.command {
            Commands::Candidates(args) => {
                assert_eq!(args.filters.skills, vec!["react", "go"]);
                assert_eq!(args.group_by, Some(Facet::Job));
            }
            _ => panic!("expected candidates"),
        }
    }
}
