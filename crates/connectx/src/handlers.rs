//! Request handlers, written once for both board variants.
//!
//! Every handler answers its caller exactly once. The caller's response is
//! queued before any notification to the opponent.

use connectx_match::{MatchError, MatchOptions, MatchRegistry, Outcome, Variant};
use connectx_protocol::{
    Codec, JoinMatch, MoveRequest, PlayerId, PlayerProfile, Request, Response, Status,
};
use connectx_session::{Authenticator, Outbox, ProfileProvider, SessionError};

use crate::hub::Hub;
use crate::reply::{MatchView, MoveNotice, ReplyBody};

/// Maps a domain error to the status the client sees.
pub(crate) fn status_for(err: &MatchError) -> Status {
    match err {
        MatchError::Unjoinable(_) => Status::Unjoinable,
        _ => Status::BadRequest,
    }
}

pub(crate) async fn create_match<V, A, P, C>(
    hub: &Hub<A, P, C>,
    registry: &MatchRegistry<V>,
    player_id: &PlayerId,
    outbox: &Outbox,
    req_id: &str,
    frame: &[u8],
) where
    V: Variant,
    A: Authenticator,
    P: ProfileProvider,
    C: Codec,
{
    let request: Request<MatchOptions<V::Dims>> = match hub.codec.decode(frame) {
        Ok(request) => request,
        Err(e) => return hub.reject(outbox, req_id, Status::BadRequest, e),
    };

    match registry.create_match(player_id.clone(), request.body).await {
        Ok(id) => {
            hub.respond(outbox, &Response::new(req_id, Status::Ok, ReplyBody::<V>::Created { id }));
        }
        Err(e) => hub.reject(outbox, req_id, status_for(&e), e),
    }
}

pub(crate) async fn join_match<V, A, P, C>(
    hub: &Hub<A, P, C>,
    registry: &MatchRegistry<V>,
    player_id: &PlayerId,
    outbox: &Outbox,
    req_id: &str,
    frame: &[u8],
) where
    V: Variant,
    A: Authenticator,
    P: ProfileProvider,
    C: Codec,
{
    let request: Request<JoinMatch> = match hub.codec.decode(frame) {
        Ok(request) => request,
        Err(e) => return hub.reject(outbox, req_id, Status::BadRequest, e),
    };

    let joined = match registry.join_match(player_id.clone(), &request.body.match_id).await {
        Ok(joined) => joined,
        Err(e) => return hub.reject(outbox, req_id, status_for(&e), e),
    };
    let snapshot = joined.snapshot;

    let (p1, p2) = match resolve_profiles(hub, &snapshot.player1().id, snapshot.player2().map(|p| &p.id)).await {
        Ok(profiles) => profiles,
        Err(e) => {
            tracing::warn!(match_id = %snapshot.id(), error = %e, "profile lookup failed");
            return hub.reject(outbox, req_id, Status::ServerError, "could not load player data");
        }
    };

    let joiner = p2.clone().filter(|_| joined.first_join);
    let view = MatchView::new(&snapshot, p1, p2);
    hub.respond(outbox, &Response::new(req_id, Status::Ok, ReplyBody::Snapshot(view)));

    if let Some(joiner) = joiner {
        let notice = Response::notification(Status::EnemyJoined, ReplyBody::<V>::Opponent(joiner));
        hub.notify(&snapshot.player1().id, &notice).await;
    }
}

pub(crate) async fn register_move<V, A, P, C>(
    hub: &Hub<A, P, C>,
    registry: &MatchRegistry<V>,
    player_id: &PlayerId,
    outbox: &Outbox,
    req_id: &str,
    frame: &[u8],
) where
    V: Variant,
    A: Authenticator,
    P: ProfileProvider,
    C: Codec,
{
    let request: Request<MoveRequest<V::Target>> = match hub.codec.decode(frame) {
        Ok(request) => request,
        Err(e) => return hub.reject(outbox, req_id, Status::BadRequest, e),
    };

    let applied = match registry.register_move(player_id, request.body).await {
        Ok(applied) => applied,
        Err(e) => return hub.reject(outbox, req_id, status_for(&e), e),
    };

    let mut notice = MoveNotice::<V> {
        target: applied.target,
        time_left_p1: applied.time_left_p1,
        time_left_p2: applied.time_left_p2,
        lines: None,
    };
    let (mine, theirs) = match applied.outcome {
        Outcome::Continue => (None, Status::EnemySentMove),
        Outcome::Win { lines } => {
            notice.lines = Some(lines);
            (Some(Status::GameoverWon), Status::GameoverLost)
        }
        Outcome::Draw => (Some(Status::GameoverDraw), Status::GameoverDraw),
    };

    let body = ReplyBody::Move(notice);
    match mine {
        Some(status) => hub.respond(outbox, &Response::new(req_id, status, &body)),
        None => hub.respond(outbox, &Response::new(req_id, Status::Ok, ReplyBody::<V>::Empty)),
    };
    hub.notify(&applied.opponent, &Response::notification(theirs, &body)).await;
}

async fn resolve_profiles<A, P, C>(
    hub: &Hub<A, P, C>,
    p1: &PlayerId,
    p2: Option<&PlayerId>,
) -> Result<(PlayerProfile, Option<PlayerProfile>), SessionError>
where
    A: Authenticator,
    P: ProfileProvider,
    C: Codec,
{
    let first = hub.profiles.get_profile(p1).await?;
    let second = match p2 {
        Some(id) => Some(hub.profiles.get_profile(id).await?),
        None => None,
    };
    Ok((first, second))
}
