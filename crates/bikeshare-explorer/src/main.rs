//! CLI entry point for the bike-share explorer.

use anyhow::{Result, anyhow};
use bikeshare_explorer::reporting::{SEPARATOR, render_imputation, render_summary};
use bikeshare_explorer::{
    Analysis, City, DayFilter, Explorer, ExplorerConfig, ExplorerError, FilterSpec, MonthFilter,
};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Explore US bike-share trip data",
    long_about = "Descriptive statistics over the bike-share trips of Chicago, New York City \
                  and Washington.\n\n\
                  Without --city the tool asks for the city, month and day interactively.\n\n\
                  EXAMPLES:\n  \
                  # Interactive session\n  \
                  bikeshare-explorer --data-dir data/\n\n  \
                  # One analysis, March Mondays in Chicago\n  \
                  bikeshare-explorer --city chicago --month mar --day mon\n\n  \
                  # Machine-readable output\n  \
                  bikeshare-explorer --city washington --json | jq .summary.records"
)]
struct Args {
    /// City to analyze (chicago, new york city, washington)
    ///
    /// If not specified, the tool runs interactively
    #[arg(short, long)]
    city: Option<City>,

    /// Month filter (all, jan, feb, mar, apr, may, jun)
    #[arg(short, long, default_value = "all")]
    month: MonthFilter,

    /// Day-of-week filter (all, mon, tue, wed, thur, fri, sat, sun)
    #[arg(short, long, default_value = "all")]
    day: DayFilter,

    /// Directory holding the city CSV files
    ///
    /// Overrides the data directory of --config
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Only show errors and the final result
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of text
    ///
    /// Disables all logs. Requires --city.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "error" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<ExplorerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            ExplorerConfig::from_json_file(path)?
        }
        None => ExplorerConfig::default(),
    };

    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if args.json && args.city.is_none() {
        return Err(anyhow!("--json requires --city"));
    }

    let config = load_config(&args)?;
    let explorer = Explorer::builder().config(config).build()?;

    match args.city {
        Some(city) => {
            let filter = FilterSpec::new(city).with_month(args.month).with_day(args.day);
            run_once(&explorer, &filter, args.json)
        }
        None => {
            let stdin = io::stdin();
            let mut console = Console::new(stdin.lock(), io::stdout());
            console.run(&explorer)
        }
    }
}

/// Run a single analysis and print it as text or JSON.
fn run_once(explorer: &Explorer, filter: &FilterSpec, json: bool) -> Result<()> {
    let result = explorer.analyze(filter);

    if json {
        let output = match &result {
            Ok(analysis) => serde_json::to_string_pretty(analysis)?,
            Err(e) => serde_json::to_string_pretty(&serde_json::json!({ "error": e }))?,
        };
        println!("{}", output);
        return result.map(|_| ()).map_err(Into::into);
    }

    let analysis = result.map_err(|e| {
        error!("Analysis failed: {}", e);
        anyhow!(e)
    })?;
    println!("{}", filter);
    println!("{}", SEPARATOR);
    println!("{}", render_imputation(&analysis.imputation)?);
    println!("{}", render_summary(&analysis.summary)?);
    Ok(())
}

/// Interactive session over any line-based input and output.
///
/// An invalid answer is retried only after the user types `YES`; any other
/// reply ends the session.
struct Console<R, W> {
    input: R,
    output: W,
}

/// Outcome of a prompt sequence.
enum Flow<T> {
    Continue(T),
    Exit,
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a prompt and read one line. End of input counts as an empty
    /// answer.
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    fn choose<T: FromStr>(&mut self, intro: &str, prompt: &str) -> Result<Flow<T>> {
        loop {
            self.say(". ".repeat(10))?;
            self.say(intro)?;
            let answer = self.ask(prompt)?;
            if let Ok(value) = answer.parse::<T>() {
                return Ok(Flow::Continue(value));
            }

            self.say("\nSorry, I didn't understand that, kindly check your input and try again")?;
            self.say(". ".repeat(10))?;
            let again =
                self.ask("Please type YES to try again or type any other value to exit this program:  ")?;
            if !is_yes(&again) {
                return Ok(Flow::Exit);
            }
        }
    }

    fn get_filters(&mut self) -> Result<Flow<FilterSpec>> {
        loop {
            self.say(". ".repeat(20))?;
            self.say("Let's explore some US bikeshare data!")?;

            let Flow::Continue(city) = self.choose::<City>(
                "what city are we exploring? ",
                "would you like to explore chicago, new york city or washington? ",
            )?
            else {
                return Ok(Flow::Exit);
            };
            let Flow::Continue(month) = self.choose::<MonthFilter>(
                "Would you like to filter data by month?",
                "Which month? jan, feb, mar, apr, may or jun? (Type 'all' for no month filter): ",
            )?
            else {
                return Ok(Flow::Exit);
            };
            let Flow::Continue(day) = self.choose::<DayFilter>(
                "Would you like to filter data by day of the week?",
                "Which day? mon, tue, wed, thur, fri, sat or sun? (Type 'all' for no day filter): ",
            )?
            else {
                return Ok(Flow::Exit);
            };

            let filter = FilterSpec::new(city).with_month(month).with_day(day);
            self.say(SEPARATOR)?;
            self.say("Based on your input, see the details of data we are about to analyse\n")?;
            self.say(filter.to_string())?;

            let confirm = self.ask("\nType YES to continue or type NO to restart.\n")?;
            if is_yes(&confirm) {
                return Ok(Flow::Continue(filter));
            }
        }
    }

    fn view_raw_data(&mut self, analysis: &Analysis) -> Result<()> {
        let mut prompt = "\nWould you like to view the bikeshare data? Type yes or no.\n";
        let mut page = 0;
        while is_yes(&self.ask(prompt)?) {
            match analysis.raw_page(page) {
                Some(rows) => self.say(rows.to_string())?,
                None => {
                    self.say("No more rows to show.")?;
                    break;
                }
            }
            page += 1;
            prompt = "\nWould you like to view more data? Type yes or no.\n";
        }
        Ok(())
    }

    fn startup_check(&mut self, explorer: &Explorer) -> Result<bool> {
        match explorer.check_sources() {
            Ok(()) => {
                self.say("\n**********Great!!! files for this analysis are in place**********\n")?;
                Ok(true)
            }
            Err(ExplorerError::MissingSources(missing)) => {
                self.say("File not accessible")?;
                self.say(format!(
                    "Please ensure you have the following files in {} and then try again",
                    explorer.config().data_dir.display()
                ))?;
                for city in City::ALL {
                    self.say(explorer.config().sources.file_for(city).display().to_string())?;
                }
                self.say("")?;
                for path in missing {
                    error!("Missing data file: {}", path.display());
                }
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Run sessions until the user declines to restart.
    fn run(&mut self, explorer: &Explorer) -> Result<()> {
        self.say("*".repeat(80))?;
        self.say(
            "\nHello! This program aims to explore data related to bike share systems for three major cities",
        )?;
        self.say("in the United States: Chicago, New York City, and Washington.")?;
        self.say(SEPARATOR)?;

        if !self.startup_check(explorer)? {
            return Err(anyhow!("data files are missing"));
        }

        loop {
            let Flow::Continue(filter) = self.get_filters()? else {
                break;
            };

            let analysis = explorer.analyze(&filter)?;

            self.say(render_imputation(&analysis.imputation)?)?;
            let go_on = self.ask(
                "\nPlease type YES to continue or type any other value to exit this program:  ",
            )?;
            if !is_yes(&go_on) {
                break;
            }

            self.say(render_summary(&analysis.summary)?)?;
            self.view_raw_data(&analysis)?;

            let restart = self.ask("\nWould you like to restart? Enter yes or no.\n")?;
            if !is_yes(&restart) {
                break;
            }
        }

        self.say("********The program has exited successfully********")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(console: &Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(&console.output).to_string()
    }

    #[test]
    fn test_get_filters_happy_path() {
        let mut c = console("Chicago\nMAR\nthur\nyes\n");
        let Flow::Continue(filter) = c.get_filters().unwrap() else {
            panic!("expected a filter");
        };

        assert_eq!(
            filter,
            FilterSpec::new(City::Chicago)
                .with_month(MonthFilter::Mar)
                .with_day(DayFilter::Thur)
        );
        assert!(printed(&c).contains("City: Chicago\nMonth: Mar\nDay of the Week: Thur"));
    }

    #[test]
    fn test_invalid_answer_retries_after_yes() {
        let mut c = console("paris\nYES\nwashington\nall\nall\nyes\n");
        let Flow::Continue(filter) = c.get_filters().unwrap() else {
            panic!("expected a filter");
        };

        assert_eq!(filter, FilterSpec::new(City::Washington));
        assert!(printed(&c).contains("Sorry, I didn't understand that"));
    }

    #[test]
    fn test_invalid_answer_then_anything_else_exits() {
        let mut c = console("chicago\ndecember\nno\n");
        assert!(matches!(c.get_filters().unwrap(), Flow::Exit));
    }

    #[test]
    fn test_declining_the_summary_restarts_the_prompts() {
        let mut c = console("chicago\nall\nall\nno\nnyc\njan\nall\nyes\n");
        let Flow::Continue(filter) = c.get_filters().unwrap() else {
            panic!("expected a filter");
        };

        assert_eq!(
            filter,
            FilterSpec::new(City::NewYorkCity).with_month(MonthFilter::Jan)
        );
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut c = console("");
        assert!(matches!(c.get_filters().unwrap(), Flow::Exit));
    }

    #[test]
    fn test_missing_sources_listing() {
        let config = ExplorerConfig::builder()
            .data_dir("/no/such/dir")
            .build()
            .unwrap();
        let explorer = Explorer::builder().config(config).build().unwrap();

        let mut c = console("");
        assert!(!c.startup_check(&explorer).unwrap());

        let text = printed(&c);
        assert!(text.contains("File not accessible"));
        assert!(text.contains("chicago.csv\nnew_york_city.csv\nwashington.csv"));
    }
}
