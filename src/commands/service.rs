//! Maintenance records and next-service forecasts.

use super::car;
use crate::{
    db::{catalog::ServiceType, db::Db, maintenance::NewMaintenance},
    libs::{
        config::Config,
        formatter::{format_date, parse_date, parse_decimal},
        forecast::{mileage_from_date, ServiceForecast},
        messages::Message,
        session::Session,
        view::View,
        worker,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input, Select};

#[derive(Debug, Args)]
pub struct ServiceArgs {
    #[command(subcommand)]
    command: ServiceCommand,
}

#[derive(Debug, Subcommand)]
enum ServiceCommand {
    /// Record a maintenance; missing values are prompted for
    Add {
        #[arg(long)]
        car: Option<i64>,
        /// Service type id from `carlog catalog services`
        #[arg(long)]
        service: Option<i64>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        mileage: Option<i64>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Next-due mileage; forecast from the service interval when omitted
        #[arg(long)]
        next_mileage: Option<i64>,
        /// Next-due date; forecast from the average yearly mileage when omitted
        #[arg(long)]
        next_date: Option<String>,
    },
    /// Show maintenance history, newest first
    History {
        #[arg(long)]
        car: Option<i64>,
    },
    /// Estimate when a service is next due
    Forecast {
        #[arg(long)]
        car: Option<i64>,
        #[arg(long)]
        service: Option<i64>,
        /// Estimate the mileage reached by this date instead
        #[arg(long)]
        until: Option<String>,
    },
}

pub async fn cmd(args: ServiceArgs) -> Result<()> {
    let session = Session::read()?;
    let avg_yearly_mileage = Config::read()?.avg_yearly_mileage();

    match args.command {
        ServiceCommand::Add {
            car,
            service,
            date,
            mileage,
            amount,
            description,
            next_mileage,
            next_date,
        } => {
            let car = car::resolve(&session, car).await?;
            let service_type = resolve_service_type(service).await?;
            let interactive = mileage.is_none() || amount.is_none();

            let date = match date {
                Some(date) => parse_date(&date)?,
                None if interactive => prompt_date(Message::PromptDate, Some(Local::now().date_naive()))?
                    .unwrap_or_else(|| Local::now().date_naive()),
                None => Local::now().date_naive(),
            };
            let mileage = match mileage {
                Some(km) => km,
                None => Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptMileage.to_string())
                    .default(car.mileage)
                    .interact_text()?,
            };
            let total_amount = parse_decimal(&match amount {
                Some(amount) => amount,
                None => Input::<String>::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptAmount.to_string())
                    .default("0".to_string())
                    .interact_text()?,
            })?;
            let description = match description {
                Some(description) => description,
                None if interactive => Input::<String>::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptDescription.to_string())
                    .allow_empty(true)
                    .interact_text()?,
                None => String::new(),
            };

            let forecast = ServiceForecast::for_interval(date, mileage, service_type.interval_km, avg_yearly_mileage);
            let next_service_mileage = match next_mileage {
                Some(km) => Some(km),
                None if interactive => prompt_optional_km(forecast.next_mileage)?,
                None => forecast.next_mileage,
            };
            let next_service_date = match next_date {
                Some(next) => Some(parse_date(&next)?),
                None if interactive => prompt_date(Message::PromptNextServiceDate, forecast.next_date)?,
                None => forecast.next_date,
            };

            let record = NewMaintenance {
                car_id: car.id,
                service_type_id: service_type.id,
                date,
                mileage,
                total_amount,
                description,
                next_service_mileage,
                next_service_date,
            };
            let recorded = worker::run(move || Db::new()?.maintenance().insert(&record)).await?;

            msg_success!(Message::MaintenanceRecorded(service_type.name));
            if recorded.mileage_raised {
                msg_info!(Message::MileageRaised(mileage));
            } else {
                msg_info!(Message::MileageUnchanged(car.mileage));
            }
            Ok(())
        }
        ServiceCommand::History { car } => {
            let car = car::resolve(&session, car).await?;
            let car_id = car.id;
            let records = worker::run(move || Db::new()?.maintenance().history(car_id)).await?;

            msg_print!(Message::MaintenanceHeader(car.display_name), true);
            if records.is_empty() {
                msg_info!(Message::NoMaintenance);
                return Ok(());
            }
            View::maintenance(&records)
        }
        ServiceCommand::Forecast { car, service, until } => {
            let car = car::resolve(&session, car).await?;
            let today = Local::now().date_naive();

            if let Some(until) = until {
                let target = parse_date(&until)?;
                match mileage_from_date(today, target, car.mileage, avg_yearly_mileage) {
                    Some(km) => msg_info!(Message::ForecastMileageForDate(format_date(&target), km)),
                    None => msg_info!(Message::ForecastNoDate),
                }
                return Ok(());
            }

            let service_type = resolve_service_type(service).await?;
            msg_print!(Message::ForecastHeader(service_type.name.clone()), true);

            let forecast = ServiceForecast::for_interval(today, car.mileage, service_type.interval_km, avg_yearly_mileage);
            let Some(next_mileage) = forecast.next_mileage else {
                msg_info!(Message::ForecastAsNeeded(service_type.name));
                return Ok(());
            };
            msg_print!(Message::ForecastNextMileage(next_mileage));
            match forecast.next_date {
                Some(date) => msg_print!(Message::ForecastNextDate(format_date(&date))),
                None => msg_print!(Message::ForecastNoDate),
            }
            Ok(())
        }
    }
}

async fn resolve_service_type(service_type_id: Option<i64>) -> Result<ServiceType> {
    if let Some(id) = service_type_id {
        return worker::run(move || Db::new()?.catalog().service_type(id)).await;
    }

    let mut types = worker::run(|| Db::new()?.catalog().service_types()).await?;
    let items: Vec<String> = types
        .iter()
        .map(|service| format!("{} / {}", service.category_name, service.name))
        .collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectServiceType.to_string())
        .items(&items)
        .default(0)
        .interact()?;
    Ok(types.remove(selection))
}

/// Empty input means no date.
fn prompt_date(prompt: Message, default: Option<NaiveDate>) -> Result<Option<NaiveDate>> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(default.as_ref().map(format_date).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    if input.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(parse_date(&input)?))
}

fn prompt_optional_km(default: Option<i64>) -> Result<Option<i64>> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptNextServiceMileage.to_string())
        .default(default.map(|km| km.to_string()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    Ok(Some(parse_decimal(input)? as i64))
}
