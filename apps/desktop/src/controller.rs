//! Runs one command against the router and prints the result.

use client_core::{
    auth::{LOGIN_FAILED, REGISTER_FAILED},
    recommendations::{FEEDBACK_FAILED, RECIPE_FAILED, RECOMMENDATIONS_FAILED},
    render, ApiClient, AuthMode, ClientError, Router, View,
};
use shared::domain::Credentials;

use crate::commands::{Command, HELP};

/// Whether a command may run while `view` is showing.
pub fn allowed_in(cmd: &Command, view: View) -> bool {
    match cmd {
        Command::Mode(_) | Command::Register { .. } | Command::Login { .. } => {
            matches!(view, View::Unauthenticated(_))
        }
        Command::Recommend { .. }
        | Command::Recipe { .. }
        | Command::Feedback { .. }
        | Command::Logout => view == View::Authenticated,
        Command::Go { .. } | Command::Status | Command::Help | Command::Quit => true,
    }
}

pub async fn dispatch(router: &mut Router, probe: &ApiClient, cmd: Command) {
    let view = router.current_view();
    if !allowed_in(&cmd, view) {
        notice(&format!("'{}' is not available on this screen", cmd.name()));
        return;
    }
    tracing::debug!(command = cmd.name(), "dispatching command");

    match cmd {
        Command::Mode(mode) => {
            router.set_auth_mode(mode);
            print_view(router);
        }
        Command::Register {
            email,
            password,
            name,
            profile,
        } => match router
            .register(&Credentials::registration(name, email, password).with_profile(profile))
            .await
        {
            Ok(outcome) => {
                notice(&outcome.message);
                print_view(router);
            }
            Err(err) => report(&err, REGISTER_FAILED),
        },
        Command::Login { email, password } => {
            match router.login(&Credentials::login(email, password)).await {
                Ok(outcome) => {
                    notice(&outcome.message);
                    if !outcome.persisted {
                        notice("the session could not be saved; it ends when you quit");
                    }
                    print_view(router);
                }
                Err(err) => report(&err, LOGIN_FAILED),
            }
        }
        Command::Recommend { location } => match router.get_recommendations(&location).await {
            Ok(recommendation) => print_lines(&render::recommendation_lines(recommendation)),
            Err(err) => report(&err, RECOMMENDATIONS_FAILED),
        },
        Command::Recipe { id } => match router.recipe_detail(&id).await {
            Ok(detail) => print_lines(&render::recipe_detail_lines(&detail)),
            Err(err) => report(&err, RECIPE_FAILED),
        },
        Command::Feedback {
            recipe_id,
            rating,
            comment,
        } => match router.submit_feedback(recipe_id, rating, comment).await {
            Ok(message) => notice(&message),
            Err(err) => report(&err, FEEDBACK_FAILED),
        },
        Command::Go { path } => {
            router.navigate(&path);
            print_view(router);
        }
        Command::Status => match probe.probe().await {
            Ok(res) => notice(res.message().unwrap_or("service reachable")),
            Err(err) => report(&err, "Service unreachable"),
        },
        Command::Logout => {
            if let Err(err) = router.logout() {
                tracing::warn!(error = %err, "session file could not be removed");
            }
            print_view(router);
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

pub fn print_view(router: &Router) {
    match router.current_view() {
        View::Unauthenticated(mode) => {
            let form = match mode {
                AuthMode::Login => "login <email> <password>",
                AuthMode::Register => "register <email> <password> <name...> [age=N ...]",
            };
            println!("== Recipe Recommender: sign in ==");
            println!("   {form}   (mode login|register to switch)");
        }
        View::Authenticated => {
            println!("== Recipe Recommender: dashboard ==");
            println!("   recommend [city]   (logout to leave)");
            print_lines(&render::recommendation_lines(router.recommendation()));
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn notice(message: &str) {
    println!("! {message}");
}

fn report(err: &ClientError, fallback: &str) {
    tracing::debug!(error = %err, "command failed");
    notice(&err.user_message(fallback));
    if err.requires_reauth() {
        notice("your session may have expired; logout and sign in again");
    }
}
