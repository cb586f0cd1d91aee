use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the sevens playtime tracker.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::public_stream,
        crate::routes::clock::get_match,
        crate::routes::clock::start_clock,
        crate::routes::clock::pause_clock,
        crate::routes::clock::reset_match,
        crate::routes::clock::seek_clock,
        crate::routes::roster::list_roster,
        crate::routes::roster::replace_roster,
        crate::routes::tracking::list_players,
        crate::routes::tracking::add_players,
        crate::routes::tracking::reset_tracking,
        crate::routes::tracking::remove_player,
        crate::routes::tracking::toggle_player,
        crate::routes::tracking::role_stop_player,
        crate::routes::tracking::list_notifications,
        crate::routes::tracking::validation_report,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::clock::MatchClockSnapshot,
            crate::dto::clock::SeekClockRequest,
            crate::dto::roster::RosterEntryInput,
            crate::dto::roster::ReplaceRosterRequest,
            crate::dto::roster::RosterEntrySummary,
            crate::dto::tracking::PlayerInput,
            crate::dto::tracking::AddPlayersRequest,
            crate::dto::tracking::AddPlayersResponse,
            crate::dto::tracking::TrackedPlayerSummary,
            crate::dto::tracking::PlayerValidationSummary,
            crate::dto::tracking::MatchSnapshot,
            crate::dto::sse::PlayerRemovedEvent,
            crate::dto::sse::TrackingResetEvent,
            crate::dto::sse::RosterUpdatedEvent,
            crate::state::roles::Role,
            crate::state::roles::PlayerConstraints,
            crate::state::clock::Half,
            crate::state::status::TimeStatus,
            crate::state::notifications::NotificationKind,
            crate::state::notifications::RoleBasedNotification,
            crate::state::validation::PlaytimeValidation,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events streams"),
        (name = "match", description = "Match clock control"),
        (name = "roster", description = "League roster used for role lookups"),
        (name = "tracking", description = "Player playtime tracking"),
    )
)]
pub struct ApiDoc;
