use std::io::Write;
use std::num::NonZeroUsize;

use chrono::NaiveDate;
use clap::Parser;

use rewards_engine::{
    report, CustomerId, Dashboard, FileSource, MonthSelector, Selection, SourceFormat,
    TransactionSource,
};

/// A cli interface to the rewards engine
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// The path to the transaction file (JSON array or CSV), `-` for stdin
    filename: std::path::PathBuf,
    /// Read the file as CSV regardless of its extension
    #[clap(long)]
    csv: bool,
    /// The customer to show points for
    #[clap(long, env = "REWARDS_CUSTOMER")]
    customer: Option<CustomerId>,
    /// `last3` or a month name like `Jan`
    #[clap(long, env = "REWARDS_MONTH", default_value = "last3")]
    month: MonthSelector,
    /// The page of the transaction table, starting at 1
    #[clap(long, default_value = "1")]
    page: usize,
    /// Transactions per page
    #[clap(long, env = "REWARDS_PAGE_SIZE", default_value = "5")]
    page_size: NonZeroUsize,
    /// Anchor the `last3` window at this day instead of today
    #[clap(long)]
    today: Option<NaiveDate>,
    /// Print the dashboard as JSON
    #[clap(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut source = FileSource::new(&args.filename);
    if args.csv {
        source = source.with_format(SourceFormat::Csv);
    }
    // a failed load is reported on its own, without any partial dashboard
    let transactions = source.fetch()?;

    let today = args.today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let selection = Selection {
        customer: args.customer,
        month: args.month,
    };
    log::debug!("Building dashboard for {:?} as of {}", selection, today);

    let dashboard = Dashboard::build(&transactions, &selection, today);
    let page = dashboard.page(args.page, args.page_size);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.json {
        serde_json::to_writer_pretty(&mut out, &report::DashboardReport::new(&dashboard, &page))?;
        writeln!(out)?;
        return Ok(());
    }

    report::write_customers(&mut out, dashboard.customers())?;
    writeln!(out)?;
    report::write_summary(&mut out, dashboard.summary())?;
    writeln!(out)?;
    report::write_page(&mut out, &page)?;

    Ok(())
}
