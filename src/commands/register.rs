use crate::{
    db::db::Db,
    libs::{messages::Message, session::Session, worker},
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    username: Option<String>,
}

pub async fn cmd(args: RegisterArgs) -> Result<()> {
    let full_name = match args.name {
        Some(name) => name,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptFullName.to_string())
            .interact_text()?,
    };
    let username = match args.username {
        Some(username) => username,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptUsername.to_string())
            .interact_text()?,
    };
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .interact()?;
    let confirmation = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPasswordConfirm.to_string())
        .interact()?;
    if password != confirmation {
        msg_bail_anyhow!(Message::PasswordsDoNotMatch);
    }

    let user = worker::run(move || Db::new()?.users().register(&full_name, &username, &password)).await?;

    Session::login(user.id, &user.full_name, &user.username).save()?;
    msg_success!(Message::Registered(user.username));
    Ok(())
}
