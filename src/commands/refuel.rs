use super::car;
use crate::{
    db::{db::Db, refuelings::NewRefueling},
    libs::{
        formatter::{format_date, parse_date, parse_decimal},
        messages::Message,
        session::Session,
        view::View,
        worker,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct RefuelArgs {
    #[command(subcommand)]
    command: RefuelCommand,
}

#[derive(Debug, Subcommand)]
enum RefuelCommand {
    /// Record a refueling; missing values are prompted for
    Add {
        #[arg(long)]
        car: Option<i64>,
        /// dd.mm.yyyy or yyyy-mm-dd, today by default
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        mileage: Option<i64>,
        /// Litres
        #[arg(long)]
        volume: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        fuel: Option<i64>,
        #[arg(long)]
        station: Option<i64>,
        #[arg(long)]
        full: Option<bool>,
    },
    /// Show refueling history, newest first
    History {
        #[arg(long)]
        car: Option<i64>,
    },
}

pub async fn cmd(args: RefuelArgs) -> Result<()> {
    let session = Session::read()?;

    match args.command {
        RefuelCommand::Add {
            car,
            date,
            mileage,
            volume,
            price,
            fuel,
            station,
            full,
        } => {
            let car = car::resolve(&session, car).await?;
            let interactive = mileage.is_none() || volume.is_none() || price.is_none();

            let date = match date {
                Some(date) => parse_date(&date)?,
                None if interactive => {
                    let input: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDate.to_string())
                        .default(format_date(&Local::now().date_naive()))
                        .interact_text()?;
                    parse_date(&input)?
                }
                None => Local::now().date_naive(),
            };
            let mileage = match mileage {
                Some(km) => km,
                None => Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptMileage.to_string())
                    .default(car.mileage)
                    .interact_text()?,
            };
            let volume = parse_decimal(&match volume {
                Some(volume) => volume,
                None => Input::<String>::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptVolume.to_string())
                    .interact_text()?,
            })?;
            let price_per_liter = parse_decimal(&match price {
                Some(price) => price,
                None => Input::<String>::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptPricePerLiter.to_string())
                    .interact_text()?,
            })?;

            let (fuel_id, station_id) = if interactive && fuel.is_none() && station.is_none() {
                prompt_fuel_and_station().await?
            } else {
                (fuel, station)
            };
            let full_tank = match full {
                Some(full) => full,
                None if interactive => Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptFullTank.to_string())
                    .default(true)
                    .interact()?,
                None => false,
            };

            let refueling = NewRefueling {
                car_id: car.id,
                fuel_id,
                station_id,
                date,
                mileage,
                volume,
                price_per_liter,
                full_tank,
            };
            let recorded = worker::run(move || Db::new()?.refuelings().insert(&refueling)).await?;

            msg_success!(Message::RefuelingRecorded(car.display_name));
            if recorded.mileage_raised {
                msg_info!(Message::MileageRaised(mileage));
            } else {
                msg_info!(Message::MileageUnchanged(car.mileage));
            }
            Ok(())
        }
        RefuelCommand::History { car } => {
            let car = car::resolve(&session, car).await?;
            let car_id = car.id;
            let refuelings = worker::run(move || Db::new()?.refuelings().history(car_id)).await?;

            msg_print!(Message::RefuelingsHeader(car.display_name), true);
            if refuelings.is_empty() {
                msg_info!(Message::NoRefuelings);
                return Ok(());
            }
            View::refuelings(&refuelings)
        }
    }
}

async fn prompt_fuel_and_station() -> Result<(Option<i64>, Option<i64>)> {
    let (fuels, stations) = worker::run(|| {
        let db = Db::new()?;
        Ok((db.catalog().fuels()?, db.catalog().stations()?))
    })
    .await?;

    let mut fuel_items = vec![Message::NotSpecified.to_string()];
    fuel_items.extend(fuels.iter().map(|fuel| fuel.label()));
    let fuel = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectFuel.to_string())
        .items(&fuel_items)
        .default(0)
        .interact()?;

    let mut station_items = vec![Message::NotSpecified.to_string()];
    station_items.extend(stations.iter().map(|station| station.name.clone()));
    let station = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectStation.to_string())
        .items(&station_items)
        .default(0)
        .interact()?;

    // index 0 is "not specified"
    Ok((
        fuel.checked_sub(1).map(|i| fuels[i].id),
        station.checked_sub(1).map(|i| stations[i].id),
    ))
}
