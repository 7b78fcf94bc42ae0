use crate::{ChoiceCommands, QuestionCommands};
use actix_web::web::Data;
use actix_web::{middleware, App, HttpServer};
use anyhow::{Context, Result};
use polls::config::Settings;
use polls::core::models::{choice::Update as ChoiceUpdate, question::{Create, Update as QuestionUpdate}};
use polls::core::ports::repository::Manager;
use polls::core::services::{choice, question, sample};
use polls::database::sqlite::SqlxManager;

async fn connect(settings: &Settings) -> Result<SqlxManager> {
    let manager = SqlxManager::connect(&settings.database_url, settings.max_connections)
        .await
        .with_context(|| format!("failed to connect to {}", settings.database_url))?;
    manager.migrate().await.context("failed to apply migrations")?;
    Ok(manager)
}

pub async fn serve(settings: Settings) -> Result<()> {
    let manager = connect(&settings).await?;
    let bind_addr = settings.bind_addr.clone();
    log::info!("listening on http://{}", bind_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(Data::new(manager.clone()))
            .app_data(Data::new(settings.clone()))
            .configure(polls::routes)
    })
    .bind(bind_addr.as_str())
    .with_context(|| format!("failed to bind {}", bind_addr))?
    .run()
    .await?;
    Ok(())
}

pub async fn migrate(settings: &Settings) -> Result<()> {
    connect(settings).await?;
    println!("migrations applied");
    Ok(())
}

pub async fn create_sample_polls(settings: &Settings) -> Result<()> {
    let manager = connect(settings).await?;
    let ids = sample::create_sample_polls(manager.tx().await?).await?;
    println!("Successfully created {} sample polls!", ids.len());
    Ok(())
}

pub async fn manage_questions(settings: &Settings, cmd: QuestionCommands) -> Result<()> {
    let manager = connect(settings).await?;
    match cmd {
        QuestionCommands::List => {
            let mut db = manager.db().await?;
            let (questions, total) = question::all_questions(&mut db).await?;
            for q in questions {
                println!("{:>5}  {}  {}", q.id, q.pub_date.format("%Y-%m-%d %H:%M"), q);
            }
            println!("{} questions", total);
        }
        QuestionCommands::Add { text, choices, pub_date } => {
            let id = question::create_question(
                manager.tx().await?,
                Create {
                    question_text: text,
                    pub_date,
                    choices,
                },
            )
            .await?;
            println!("created question {}", id);
        }
        QuestionCommands::Edit { id, text, pub_date } => {
            let mut db = manager.db().await?;
            let q = question::update_question(
                &mut db,
                id,
                QuestionUpdate {
                    question_text: text,
                    pub_date,
                },
            )
            .await?;
            println!("updated question {}: {}", q.id, q);
        }
        QuestionCommands::Delete { id } => {
            let removed = question::delete_question(manager.tx().await?, id).await?;
            println!("deleted question {} and {} choices", id, removed);
        }
    }
    Ok(())
}

pub async fn manage_choices(settings: &Settings, cmd: ChoiceCommands) -> Result<()> {
    let manager = connect(settings).await?;
    let mut db = manager.db().await?;
    match cmd {
        ChoiceCommands::Add { question_id, text } => {
            let c = choice::add_choice(&mut db, question_id, text).await?;
            println!("created choice {}: {}", c.id, c);
        }
        ChoiceCommands::Edit { id, text, votes } => {
            let c = choice::update_choice(&mut db, id, ChoiceUpdate { choice_text: text, votes }).await?;
            println!("updated choice {}: {}", c.id, c);
        }
        ChoiceCommands::Reset { id } => {
            let c = choice::reset_votes(&mut db, id).await?;
            println!("reset choice {}: {}", c.id, c);
        }
        ChoiceCommands::Delete { id } => {
            choice::delete_choice(&mut db, id).await?;
            println!("deleted choice {}", id);
        }
    }
    Ok(())
}
