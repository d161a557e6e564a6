use crate::{
    api::{ApiClient, ApiError},
    cli::actions::{print_json, user_error},
    features::{
        answers::{self, NewAnswer},
        auth::AuthSession,
        me::{self, ProfileUpdate},
        tracks::{self, Feed, LoadMode, NewTrack},
        users, ImageUpload,
    },
};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub enum Args {
    Me,
    UpdateMe {
        username: Option<String>,
        bio: Option<String>,
        avatar: Option<PathBuf>,
    },
    User {
        username: String,
    },
    Tracks {
        page: u32,
        search: Option<String>,
        all: bool,
    },
    Track {
        id: u64,
    },
    CreateTrack {
        subject: String,
        description: String,
        categories: Vec<u64>,
        images: Vec<PathBuf>,
    },
    Like {
        id: u64,
    },
    Categories,
    Answers {
        track_id: u64,
        page: Option<u32>,
    },
    Answer {
        track_id: u64,
        comment: String,
        solution: bool,
        images: Vec<PathBuf>,
    },
    Solve {
        answer_id: u64,
    },
}

/// Runs a resource command. Every resource needs a signed-in session.
/// # Errors
/// Returns an error when signed out, or the user-facing message of a failed request.
pub async fn execute(args: Args, session: &AuthSession) -> Result<()> {
    if !session.is_authenticated() {
        bail!("Not signed in. Run `tracks login` first.");
    }

    run(args, session.api()).await.map_err(|e| user_error(&e))
}

async fn run(args: Args, api: &ApiClient) -> Result<(), ApiError> {
    match args {
        Args::Me => emit(&me::client::fetch_me(api).await?),
        Args::UpdateMe {
            username,
            bio,
            avatar,
        } => {
            let avatar = match avatar {
                Some(path) => Some(ImageUpload::from_path(&path).await?),
                None => None,
            };
            let update = ProfileUpdate {
                username,
                bio,
                avatar,
            };
            emit(&me::client::update_me(api, update).await?)
        }
        Args::User { username } => emit(&users::client::fetch_user(api, &username).await?),
        Args::Tracks { page, search, all } => {
            if all {
                list_all_tracks(api, search.as_deref()).await
            } else {
                emit(&tracks::client::list_tracks(api, page, search.as_deref()).await?)
            }
        }
        Args::Track { id } => emit(&tracks::client::fetch_track(api, id).await?),
        Args::CreateTrack {
            subject,
            description,
            categories,
            images,
        } => {
            let track = NewTrack {
                subject,
                description,
                category_ids: categories,
                images: read_images(&images).await?,
            };
            emit(&tracks::client::create_track(api, track).await?)
        }
        Args::Like { id } => {
            let mut track = tracks::client::fetch_track(api, id).await?;
            tracks::client::toggle_like(api, &mut track).await?;
            emit(&track)
        }
        Args::Categories => emit(&tracks::client::list_categories(api).await?),
        Args::Answers { track_id, page } => {
            emit(&answers::client::list_answers(api, track_id, page).await?)
        }
        Args::Answer {
            track_id,
            comment,
            solution,
            images,
        } => {
            let answer = NewAnswer {
                comment,
                solution,
                images: read_images(&images).await?,
            };
            emit(&answers::client::post_answer(api, track_id, answer).await?)
        }
        Args::Solve { answer_id } => emit(&answers::client::mark_solution(api, answer_id).await?),
    }
}

async fn list_all_tracks(api: &ApiClient, search: Option<&str>) -> Result<(), ApiError> {
    let mut feed = Feed::new();
    let mut mode = LoadMode::Refresh;

    loop {
        let added = feed
            .load(mode, |page| tracks::client::list_tracks(api, page, search))
            .await?;
        debug!(added, next_page = feed.next_page(), "feed page loaded");
        if feed.is_exhausted() {
            break;
        }
        mode = LoadMode::More;
    }

    emit(feed.items())
}

async fn read_images(paths: &[PathBuf]) -> Result<Vec<ImageUpload>, ApiError> {
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        images.push(ImageUpload::from_path(Path::new(path)).await?);
    }
    Ok(images)
}

fn emit<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), ApiError> {
    print_json(value).map_err(|err| ApiError::Serialization(err.to_string()))
}
