use crate::{
    db::db::Db,
    libs::{messages::Message, session::Session, view::View, worker},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    command: CatalogCommand,
}

#[derive(Debug, Subcommand)]
enum CatalogCommand {
    /// List car brands
    Brands,
    /// List the models of a brand
    Models { brand_id: i64 },
    /// List fuels
    Fuels,
    /// List gas stations
    Stations,
    /// List service types and their intervals
    Services,
    AddBrand {
        name: String,
    },
    AddModel {
        brand_id: i64,
        name: String,
    },
    AddFuel {
        name: String,
        #[arg(long, default_value = "")]
        marking: String,
    },
    AddStation {
        name: String,
        #[arg(long, default_value = "")]
        address: String,
    },
    AddService {
        name: String,
        /// Distance between services in km, 0 for "as needed"
        #[arg(long, default_value_t = 0)]
        interval: i64,
        #[arg(long)]
        category: Option<i64>,
    },
}

pub async fn cmd(args: CatalogArgs) -> Result<()> {
    Session::read()?.require_user()?;

    match args.command {
        CatalogCommand::Brands => {
            let brands = worker::run(|| Db::new()?.catalog().brands()).await?;
            print_list(Message::BrandsHeader, brands.is_empty(), || View::brands(&brands))
        }
        CatalogCommand::Models { brand_id } => {
            let (brand, models) = worker::run(move || {
                let db = Db::new()?;
                let brand = db.catalog().brands()?.into_iter().find(|brand| brand.id == brand_id);
                Ok((brand, db.catalog().models(brand_id)?))
            })
            .await?;
            let brand_name = brand.map(|brand| brand.name).unwrap_or_else(|| brand_id.to_string());
            print_list(Message::ModelsHeader(brand_name), models.is_empty(), || View::models(&models))
        }
        CatalogCommand::Fuels => {
            let fuels = worker::run(|| Db::new()?.catalog().fuels()).await?;
            print_list(Message::FuelsHeader, fuels.is_empty(), || View::fuels(&fuels))
        }
        CatalogCommand::Stations => {
            let stations = worker::run(|| Db::new()?.catalog().stations()).await?;
            print_list(Message::StationsHeader, stations.is_empty(), || View::stations(&stations))
        }
        CatalogCommand::Services => {
            let types = worker::run(|| Db::new()?.catalog().service_types()).await?;
            print_list(Message::ServiceTypesHeader, types.is_empty(), || View::service_types(&types))
        }
        CatalogCommand::AddBrand { name } => {
            let stored = name.clone();
            worker::run(move || Db::new()?.catalog().add_brand(&stored)).await?;
            msg_success!(Message::BrandAdded(name));
            Ok(())
        }
        CatalogCommand::AddModel { brand_id, name } => {
            let stored = name.clone();
            worker::run(move || Db::new()?.catalog().add_model(brand_id, &stored)).await?;
            msg_success!(Message::ModelAdded(name));
            Ok(())
        }
        CatalogCommand::AddFuel { name, marking } => {
            let stored = name.clone();
            worker::run(move || Db::new()?.catalog().add_fuel(&stored, &marking)).await?;
            msg_success!(Message::FuelAdded(name));
            Ok(())
        }
        CatalogCommand::AddStation { name, address } => {
            let stored = name.clone();
            worker::run(move || Db::new()?.catalog().add_station(&stored, &address)).await?;
            msg_success!(Message::StationAdded(name));
            Ok(())
        }
        CatalogCommand::AddService { name, interval, category } => {
            let stored = name.clone();
            worker::run(move || Db::new()?.catalog().add_service_type(&stored, category, interval)).await?;
            msg_success!(Message::ServiceTypeAdded(name));
            Ok(())
        }
    }
}

fn print_list(header: Message, empty: bool, render: impl FnOnce() -> Result<()>) -> Result<()> {
    msg_print!(header, true);
    if empty {
        msg_info!(Message::CatalogEmpty);
        return Ok(());
    }
    render()
}
