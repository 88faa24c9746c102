use super::car;
use crate::{
    db::db::Db,
    libs::{
        formatter::{format_date, parse_date},
        messages::Message,
        session::Session,
        statistics::DateRange,
        view::View,
        worker,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[arg(long)]
    car: Option<i64>,
    /// Start of the period, 1 January of the current year by default
    #[arg(long)]
    from: Option<String>,
    /// End of the period, today by default
    #[arg(long)]
    to: Option<String>,
}

pub async fn cmd(args: StatsArgs) -> Result<()> {
    let session = Session::read()?;
    let car = car::resolve(&session, args.car).await?;

    let today = Local::now().date_naive();
    let from = match args.from {
        Some(from) => parse_date(&from)?,
        None => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
    };
    let to = match args.to {
        Some(to) => parse_date(&to)?,
        None => today,
    };
    let range = DateRange::new(from, to)?;

    let car_id = car.id;
    let report = worker::run(move || Db::new()?.statistics().report(car_id, range)).await?;

    msg_print!(
        Message::StatisticsHeader(car.display_name, format_date(&range.from), format_date(&range.to)),
        true
    );
    if report.totals.total == 0.0 && report.consumption.refuel_count == 0 {
        msg_info!(Message::NoExpensesInRange);
        return Ok(());
    }
    View::statistics(&report)
}
