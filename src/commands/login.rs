use crate::{
    db::db::Db,
    libs::{messages::Message, session::Session, worker},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Args)]
pub struct LoginArgs {
    username: Option<String>,
}

pub async fn cmd(login_args: LoginArgs) -> Result<()> {
    let username = match login_args.username {
        Some(username) => username,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptUsername.to_string())
            .interact_text()?,
    };
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .interact()?;

    let user = worker::run(move || Db::new()?.users().authenticate(&username, &password)).await?;

    Session::login(user.id, &user.full_name, &user.username).save()?;
    msg_success!(Message::LoggedIn(user.full_name));
    Ok(())
}
