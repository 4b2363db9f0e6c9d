use anyhow::{bail, Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use trade_journal::config::{mask_api_key, Config, Settings};
use trade_journal::critique::{spawn_critique, Critic, CritiqueRequest, GeminiCritic};
use trade_journal::error::JournalError;
use trade_journal::journal::{CalendarView, JsonFileRepository, TradeRepository, YearMonth};
use trade_journal::models::{image_data_url, with_analysis, TradeDraft};
use trade_journal::report::{
    render_calendar, render_day, render_journal, render_trade, JournalReport,
};

const USAGE: &str = "\
usage: trade-journal [command]

  summary                                   dashboard stats and equity curve (default)
  list                                      trade log
  show ID                                   one trade with notes, chart and critique
  calendar [YYYY-MM] [FROM TO]              month view, optional inclusive date filter
  add DATE SYMBOL LONG|SHORT ENTRY EXIT QTY [FEES] [SETUP] [NOTES] [--image PATH]
  remove ID
  critique ID [--save]                      ask the AI mentor, --save attaches the text
  set-key KEY                               store the Gemini API key
  reset                                     delete all trades (demo data returns)";

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("summary");
    let rest = args.get(1..).unwrap_or(&[]);

    let mut repo = JsonFileRepository::from_config(&cfg);
    info!("Journal store: {}", repo.path().display());

    match command {
        "summary" => {
            let trades = repo.list()?;
            print!("{}", JournalReport::from_trades(&trades));
        }
        "list" => {
            let trades = repo.list()?;
            print!("{}", render_journal(&trades)?);
        }
        "show" => {
            let id = rest.first().context("show needs a trade id")?;
            let trade = repo
                .get(id)?
                .ok_or_else(|| JournalError::NotFound(id.clone()))?;
            print!("{}", render_trade(&trade)?);
        }
        "calendar" => calendar(&mut repo, rest)?,
        "add" => {
            let draft = parse_draft(rest)?;
            draft.validate()?;
            let trade = draft.into_trade(None);
            let id = trade.id.clone();
            let trades = repo.upsert(trade)?;
            println!("Added trade {} ({} trades in journal)", id, trades.len());
        }
        "remove" => {
            let id = rest.first().context("remove needs a trade id")?;
            let before = repo.list()?.len();
            let trades = repo.remove(id)?;
            if trades.len() == before {
                return Err(JournalError::NotFound(id.clone()).into());
            }
            println!("Removed trade {} ({} trades left)", id, trades.len());
        }
        "critique" => critique(&cfg, &mut repo, rest).await?,
        "set-key" => {
            let key = rest.first().context("set-key needs a key")?;
            let path = cfg.settings_path();
            let mut settings = Settings::load(&path)?;
            settings.set_api_key(key);
            settings.save(&path)?;
            println!("API key saved: {}", mask_api_key(key.trim()));
        }
        "reset" => {
            repo.clear()?;
            println!("Journal cleared");
        }
        "help" | "-h" | "--help" => println!("{}", USAGE),
        other => bail!("unknown command {:?}\n\n{}", other, USAGE),
    }

    Ok(())
}

fn calendar(repo: &mut JsonFileRepository, args: &[String]) -> Result<()> {
    let mut view = CalendarView::today();
    if let Some(month) = args.first() {
        view.month = YearMonth::parse(month)
            .with_context(|| format!("expected YYYY-MM, got {:?}", month))?;
    }
    if let (Some(from), Some(to)) = (args.get(1), args.get(2)) {
        view.set_filter(from.as_str(), to.as_str());
    }

    let trades = repo.list()?;
    let buckets = view.buckets(&trades);
    print!("{}", render_calendar(view.month, &buckets)?);

    let mut days: Vec<u32> = buckets.keys().filter_map(|k| k.parse().ok()).collect();
    days.sort_unstable();
    for day in days {
        if view.select_day(day, &buckets) {
            if let Some(stats) = view.selected(&buckets) {
                println!();
                print!("{}", render_day(stats)?);
            }
        }
    }
    Ok(())
}

fn parse_draft(args: &[String]) -> Result<TradeDraft> {
    let (args, image) = match args.iter().position(|a| a == "--image") {
        Some(i) => {
            let path = args.get(i + 1).context("--image needs a file path")?;
            let rest = [&args[..i], &args[i + 2..]].concat();
            (rest, Some(path.clone()))
        }
        None => (args.to_vec(), None),
    };

    if args.len() < 6 {
        bail!("add needs at least DATE SYMBOL TYPE ENTRY EXIT QTY\n\n{}", USAGE);
    }
    let number = |i: usize, name: &str| -> Result<f64> {
        args[i]
            .parse::<f64>()
            .with_context(|| format!("{} must be a number, got {:?}", name, args[i]))
    };

    let mut draft = TradeDraft {
        date: args[0].clone(),
        symbol: args[1].to_uppercase(),
        trade_type: args[2].parse().map_err(anyhow::Error::msg)?,
        entry_price: number(3, "ENTRY")?,
        exit_price: number(4, "EXIT")?,
        quantity: number(5, "QTY")?,
        ..TradeDraft::default()
    };
    if args.len() > 6 {
        draft.fees = number(6, "FEES")?;
    }
    if let Some(setup) = args.get(7) {
        draft.setup = setup.clone();
    }
    if args.len() > 8 {
        draft.notes = args[8..].join(" ");
    }
    if let Some(path) = image {
        draft.image_url = Some(
            image_data_url(Path::new(&path))
                .with_context(|| format!("could not read image {:?}", path))?,
        );
    }
    Ok(draft)
}

async fn critique(cfg: &Config, repo: &mut JsonFileRepository, args: &[String]) -> Result<()> {
    let id = args.first().context("critique needs a trade id")?;
    let save = args.iter().any(|a| a == "--save");

    let trade = repo
        .get(id)?
        .ok_or_else(|| JournalError::NotFound(id.clone()))?;

    let settings = Settings::load(&cfg.settings_path())?;
    let critic: Arc<dyn Critic> = Arc::new(GeminiCritic::new(cfg, cfg.api_key(&settings)));

    let task = spawn_critique(critic, CritiqueRequest::from(&trade));
    let text = tokio::select! {
        text = task.wait() => text.context("critique task was cancelled")?,
        _ = tokio::signal::ctrl_c() => {
            println!("Cancelled");
            return Ok(());
        }
    };

    println!("{}", text);
    if save {
        repo.upsert(with_analysis(&trade, text))?;
        println!("Saved analysis to trade {}", trade.id);
    }
    Ok(())
}
