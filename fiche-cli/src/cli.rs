//! Command-line arguments

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

use fiche_client::ClientConfig;
use fiche_client::config::DEFAULT_SEARCH_DEBOUNCE_MS;
use shared::menu::SortKey;
use shared::models::{CourseType, ReservationStatus};

#[derive(Parser, Debug)]
#[command(name = "fiche")]
#[command(version)]
#[command(about = "Kitchen-sheet back office", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub logging: LogArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Backend base URL
    #[arg(long, env = "FICHE_API_URL", default_value = "http://localhost:8000", global = true)]
    pub api_url: String,

    /// Path prefix of every endpoint
    #[arg(long, env = "FICHE_API_PREFIX", default_value = "/api", global = true)]
    pub api_prefix: String,

    /// Request timeout in seconds
    #[arg(long, env = "FICHE_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout: u64,

    /// Quiet period before a dish search fires
    #[arg(long, env = "FICHE_SEARCH_DEBOUNCE_MS", default_value_t = DEFAULT_SEARCH_DEBOUNCE_MS, global = true)]
    pub search_debounce_ms: u64,
}

impl ConnectionArgs {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone())
            .with_api_prefix(self.api_prefix.clone())
            .with_timeout(self.timeout)
            .with_search_debounce_ms(self.search_debounce_ms)
    }
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Log level when RUST_LOG is unset
    #[arg(long = "log-level", env = "FICHE_LOG_LEVEL", default_value = "warn", global = true)]
    pub level: String,

    /// JSON log lines
    #[arg(long = "log-json", env = "FICHE_LOG_JSON", global = true)]
    pub json: bool,

    /// Also write daily rotated log files here
    #[arg(long = "log-dir", env = "FICHE_LOG_DIR", global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dish catalogue
    Menu {
        #[command(subcommand)]
        command: MenuCommand,
    },
    /// Kitchen sheets
    #[command(alias = "reservations")]
    Reservation {
        #[command(subcommand)]
        command: ReservationCommand,
    },
    /// Dish autocomplete: each stdin line is the current text of the field
    Dishes {
        #[arg(long, default_value = "plat")]
        course: CourseType,
    },
    /// PDF exports
    Pdf {
        #[command(subcommand)]
        command: PdfCommand,
    },
    /// Zenchef booking import
    Zenchef {
        #[command(subcommand)]
        command: ZenchefCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum MenuCommand {
    /// List dishes with optional filters and sort
    List {
        /// Name fragment
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(long)]
        course: Option<CourseType>,
        /// Only active (true) or inactive (false) dishes
        #[arg(long)]
        active: Option<bool>,
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
        /// Descending sort
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Add a dish
    Add {
        name: String,
        #[arg(long)]
        course: CourseType,
        /// Create the dish hidden from autocomplete
        #[arg(long)]
        inactive: bool,
    },
    /// Flip the active flag of a dish
    Toggle { id: Uuid },
    /// Delete a dish
    Delete { id: Uuid },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Course,
    Active,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Course => SortKey::Course,
            SortArg::Active => SortKey::Active,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ReservationCommand {
    /// List sheets, optionally by client name and day
    List {
        #[arg(short, long)]
        q: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Sheets from today on
    Upcoming,
    /// Sheets before today
    Past {
        #[arg(short, long)]
        q: Option<String>,
    },
    /// Show one sheet
    Show { id: Uuid },
    /// Create (`new`) or edit a sheet
    ///
    /// Anything that is not a reservation id opens a new sheet.
    Edit {
        #[arg(default_value = "new")]
        id: String,
        /// Service day prefilled on a new sheet (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Copy a sheet
    Duplicate { id: Uuid },
    /// Delete a sheet
    Delete { id: Uuid },
}

/// Field overrides applied to the draft before submit
#[derive(Args, Debug, Default, Clone)]
pub struct DraftArgs {
    /// JSON draft replacing the loaded one
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub service_date: Option<NaiveDate>,
    /// Arrival time, HH:MM
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub pax: Option<i32>,
    /// Drink formula label
    #[arg(long)]
    pub drink: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    /// Remove every dish row before adding items
    #[arg(long)]
    pub clear_items: bool,
    /// Dish row, repeatable
    #[arg(long = "item", value_name = "COURSE:NAME[:QTY]")]
    pub items: Vec<DishLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Draft,
    Confirmed,
    Printed,
}

impl From<StatusArg> for ReservationStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Draft => ReservationStatus::Draft,
            StatusArg::Confirmed => ReservationStatus::Confirmed,
            StatusArg::Printed => ReservationStatus::Printed,
        }
    }
}

/// `course:name[:quantity]`, quantity defaulting to 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishLine {
    pub course: CourseType,
    pub name: String,
    pub quantity: i32,
}

impl FromStr for DishLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (course, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("expected COURSE:NAME[:QTY], got '{s}'"))?;
        let course: CourseType = course.parse().map_err(|e| format!("{e}"))?;
        let (name, quantity) = match rest.rsplit_once(':') {
            Some((name, qty)) if qty.trim().parse::<i32>().is_ok() => {
                (name, qty.trim().parse::<i32>().map_err(|e| e.to_string())?)
            }
            _ => (rest, 1),
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("dish name missing in '{s}'"));
        }
        Ok(Self {
            course,
            name: name.to_string(),
            quantity,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum PdfCommand {
    /// Sheets of one service day
    Day {
        date: NaiveDate,
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// One sheet
    Sheet {
        id: Uuid,
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ZenchefCommand {
    /// Show the stored credentials (token masked)
    Settings,
    /// Update the stored credentials
    Configure {
        #[arg(long)]
        token: Option<String>,
        #[arg(long)]
        restaurant: Option<String>,
    },
    /// Import bookings; defaults to today
    Sync {
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Defaults to --from
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Reuse a key to replay a sync safely
        #[arg(long)]
        key: Option<String>,
    },
}
