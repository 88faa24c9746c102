//! Vehicle management: list, add, edit, delete and select cars.

use crate::{
    db::{
        cars::{Car, CarForm},
        db::Db,
    },
    libs::{error::CarlogError, messages::Message, session::Session, view::View, worker},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CarArgs {
    #[command(subcommand)]
    command: CarCommand,
}

#[derive(Debug, Subcommand)]
enum CarCommand {
    /// List your cars
    List,
    /// Add a car
    Add {
        /// Model id from `carlog catalog models`
        #[arg(long)]
        model: Option<i64>,
        /// Current mileage in km
        #[arg(long)]
        mileage: Option<i64>,
        /// Photo file to attach
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Edit a car
    Edit {
        id: Option<i64>,
        #[arg(long)]
        model: Option<i64>,
        #[arg(long)]
        mileage: Option<i64>,
        #[arg(long)]
        photo: Option<PathBuf>,
        /// Remove the attached photo
        #[arg(long, conflicts_with = "photo")]
        remove_photo: bool,
    },
    /// Delete a car with all its records
    Delete {
        id: Option<i64>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Choose the car other commands work with
    Select {
        id: Option<i64>,
        /// Clear the selection
        #[arg(long, conflicts_with = "id")]
        clear: bool,
    },
}

pub async fn cmd(args: CarArgs) -> Result<()> {
    let mut session = Session::read()?;
    let user_id = session.require_user()?;

    match args.command {
        CarCommand::List => {
            let cars = worker::run(move || Db::new()?.cars().list_for_user(user_id)).await?;
            if cars.is_empty() {
                msg_info!(Message::NoCars);
                return Ok(());
            }
            msg_print!(Message::CarsHeader, true);
            View::cars(&cars, session.current_car_id)
        }
        CarCommand::Add { model, mileage, photo } => {
            let model_id = match model {
                Some(id) => Some(id),
                None => prompt_model().await?,
            };
            let mileage = match mileage {
                Some(km) => km,
                None => prompt_mileage(None)?,
            };
            let photo = photo.map(std::fs::read).transpose()?;
            let form = CarForm { model_id, mileage, photo };

            let car = worker::run(move || {
                let db = Db::new()?;
                let car_id = db.cars().insert(user_id, &form)?;
                db.cars().require(user_id, car_id)
            })
            .await?;

            msg_success!(Message::CarAdded(car.display_name.clone()));
            if session.current_car_id.is_none() {
                session.select_car(car.id, &car.display_name);
                session.save()?;
                msg_info!(Message::CarSelected(car.display_name));
            }
            Ok(())
        }
        CarCommand::Edit {
            id,
            model,
            mileage,
            photo,
            remove_photo,
        } => {
            let car = resolve(&session, id).await?;
            let interactive = model.is_none() && mileage.is_none() && photo.is_none() && !remove_photo;

            let model_id = match model {
                Some(id) => Some(id),
                None if interactive => {
                    let keep = Confirm::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::KeepCurrentModel(car.display_name.clone()).to_string())
                        .default(true)
                        .interact()?;
                    if keep {
                        car.model_id
                    } else {
                        prompt_model().await?
                    }
                }
                None => car.model_id,
            };
            let mileage = match mileage {
                Some(km) => km,
                None if interactive => prompt_mileage(Some(car.mileage))?,
                None => car.mileage,
            };
            let photo = match photo {
                Some(path) => Some(std::fs::read(path)?),
                None if remove_photo => None,
                None => car.photo.clone(),
            };

            let form = CarForm { model_id, mileage, photo };
            let car_id = car.id;
            let updated = worker::run(move || {
                let db = Db::new()?;
                db.cars().update(user_id, car_id, &form)?;
                db.cars().require(user_id, car_id)
            })
            .await?;

            if session.current_car_id == Some(updated.id) {
                session.select_car(updated.id, &updated.display_name);
                session.save()?;
            }
            msg_success!(Message::CarUpdated(updated.display_name));
            Ok(())
        }
        CarCommand::Delete { id, yes } => {
            let car = resolve(&session, id).await?;

            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteCar(car.display_name.clone()).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::CarDeleteCancelled);
                return Ok(());
            }

            let car_id = car.id;
            worker::run(move || Db::new()?.cars().delete(user_id, car_id)).await?;

            if session.current_car_id == Some(car_id) {
                session.unselect_car();
                session.save()?;
            }
            msg_success!(Message::CarDeleted(car.display_name));
            Ok(())
        }
        CarCommand::Select { id, clear } => {
            if clear {
                session.unselect_car();
                session.save()?;
                msg_success!(Message::CarSelectionCleared);
                return Ok(());
            }

            let car = match id {
                Some(car_id) => worker::run(move || Db::new()?.cars().require(user_id, car_id)).await?,
                None => choose(user_id).await?,
            };
            session.select_car(car.id, &car.display_name);
            session.save()?;
            msg_success!(Message::CarSelected(car.display_name));
            Ok(())
        }
    }
}

/// The car a command works on: the explicit id, else the selected car, else
/// the only car, else a prompt.
pub async fn resolve(session: &Session, car_id: Option<i64>) -> Result<Car> {
    let user_id = session.require_user()?;
    match car_id.or(session.current_car_id) {
        Some(car_id) => worker::run(move || Db::new()?.cars().require(user_id, car_id)).await,
        None => choose(user_id).await,
    }
}

async fn choose(user_id: i64) -> Result<Car> {
    let mut cars = worker::run(move || Db::new()?.cars().list_for_user(user_id)).await?;
    match cars.len() {
        0 => Err(CarlogError::NoCarSelected.into()),
        1 => Ok(cars.remove(0)),
        _ => {
            let names: Vec<String> = cars.iter().map(|car| car.display_name.clone()).collect();
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptSelectCar.to_string())
                .items(&names)
                .default(0)
                .interact()?;
            Ok(cars.remove(selection))
        }
    }
}

async fn prompt_model() -> Result<Option<i64>> {
    let brands = worker::run(|| Db::new()?.catalog().brands()).await?;
    if brands.is_empty() {
        msg_info!(Message::NoBrands);
        return Ok(None);
    }

    let names: Vec<&str> = brands.iter().map(|brand| brand.name.as_str()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectBrand.to_string())
        .items(&names)
        .default(0)
        .interact()?;
    let brand = brands[selection].clone();

    let brand_id = brand.id;
    let models = worker::run(move || Db::new()?.catalog().models(brand_id)).await?;
    if models.is_empty() {
        msg_info!(Message::NoModels(brand.name));
        return Ok(None);
    }

    let names: Vec<&str> = models.iter().map(|model| model.name.as_str()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectModel.to_string())
        .items(&names)
        .default(0)
        .interact()?;
    Ok(Some(models[selection].id))
}

fn prompt_mileage(current: Option<i64>) -> Result<i64> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<i64>::with_theme(&theme).with_prompt(Message::PromptMileage.to_string());
    if let Some(current) = current {
        input = input.default(current);
    }
    Ok(input
        .validate_with(|km: &i64| if *km >= 0 { Ok(()) } else { Err("mileage must not be negative") })
        .interact_text()?)
}
