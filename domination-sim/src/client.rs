use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_channel::{Receiver, Sender};
use tracing::{debug, error, info, warn};

use crate::error::ReplyError;
use crate::events::*;
use crate::gameplay::{GameOutcome, GameOverReason, GameReport};
use crate::prompters::{DefaultPrompter, Policy};
use crate::scheduler::RunnerState;
use crate::zones::ActorId;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Player,
    Kibitzer,
}

#[derive(Debug, Default)]
struct Mailbox {
    pending: Option<PendingRequest>,
    policy: Option<Box<dyn Policy>>,
    removed: bool,
}

/// Outcome of kicking an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickOutcome {
    /// the outstanding request was answered on the actor's behalf
    Answered(RequestId),
    Idle,
}

/// Sequence number and runner state, shared by every mailbox of a table.
#[derive(Debug, Default)]
pub struct Status {
    inner: Mutex<StatusInner>,
    changed: Condvar,
}

#[derive(Debug, Default)]
struct StatusInner {
    seqno: u64,
    state: RunnerState,
    report: Option<GameReport>,
}

impl Status {
    pub fn seqno(&self) -> u64 {
        lock(&self.inner).seqno
    }

    pub fn bump(&self) {
        lock(&self.inner).seqno += 1;
        self.changed.notify_all();
    }

    pub fn state(&self) -> RunnerState {
        lock(&self.inner).state
    }

    pub fn set_state(&self, state: RunnerState) {
        let mut inner = lock(&self.inner);
        inner.state = state;
        inner.seqno += 1;
        self.changed.notify_all();
    }

    pub fn finish(&self, report: Option<GameReport>) {
        let mut inner = lock(&self.inner);
        inner.state = RunnerState::Ended;
        inner.report = report;
        inner.seqno += 1;
        self.changed.notify_all();
    }

    pub fn report(&self) -> Option<GameReport> {
        lock(&self.inner).report.clone()
    }

    /// Blocks until the sequence number moves past `seqno`.
    pub fn wait_for_update(&self, seqno: u64) -> u64 {
        let inner = lock(&self.inner);
        let inner = self
            .changed
            .wait_while(inner, |i| i.seqno == seqno)
            .unwrap_or_else(PoisonError::into_inner);
        inner.seqno
    }

    /// Same as `wait_for_update`, gives up after `timeout`.
    pub fn wait_for_update_timeout(&self, seqno: u64, timeout: Duration) -> u64 {
        let inner = lock(&self.inner);
        let (inner, _) = self
            .changed
            .wait_timeout_while(inner, timeout, |i| i.seqno == seqno)
            .unwrap_or_else(PoisonError::into_inner);
        inner.seqno
    }
}

/// The mailbox of one actor: a single request slot, a reply slot and a notice feed.
#[derive(Debug)]
pub struct ActorChannel {
    pub actor: ActorId,
    pub name: String,
    pub kind: ActorKind,
    mailbox: Mutex<Mailbox>,
    reply_send: Sender<(RequestId, Reply)>,
    reply_receive: Receiver<(RequestId, Reply)>,
    notice_send: Sender<InfoNotice>,
    notice_receive: Receiver<InfoNotice>,
    status: Arc<Status>,
}

impl ActorChannel {
    fn new(
        actor: ActorId,
        name: String,
        kind: ActorKind,
        policy: Option<Box<dyn Policy>>,
        status: Arc<Status>,
    ) -> Self {
        let (reply_send, reply_receive) = async_channel::bounded(1);
        let (notice_send, notice_receive) = async_channel::unbounded();
        ActorChannel {
            actor,
            name,
            kind,
            mailbox: Mutex::new(Mailbox {
                policy,
                ..Default::default()
            }),
            reply_send,
            reply_receive,
            notice_send,
            notice_receive,
            status,
        }
    }

    pub fn pending_request(&self) -> Option<PendingRequest> {
        lock(&self.mailbox).pending.clone()
    }

    pub fn has_policy(&self) -> bool {
        lock(&self.mailbox).policy.is_some()
    }

    pub fn is_removed(&self) -> bool {
        lock(&self.mailbox).removed
    }

    /// Answers the outstanding request. The id must match the one in the slot.
    pub fn reply(&self, id: RequestId, reply: Reply) -> Result<(), ReplyError> {
        let mut mailbox = lock(&self.mailbox);
        match &mailbox.pending {
            None => return Err(ReplyError::NoPendingRequest),
            Some(p) if p.id != id => {
                return Err(ReplyError::StaleRequest {
                    expected: p.id,
                    got: id,
                })
            }
            Some(_) => {}
        }
        mailbox.pending = None;
        debug!("{} replied to {id}: {reply:?}", self.actor);
        self.reply_send
            .try_send((id, reply))
            .map_err(|_| ReplyError::GameEnded)?;
        drop(mailbox);
        self.status.bump();
        Ok(())
    }

    pub fn drain_notices(&self) -> Vec<InfoNotice> {
        let mut notices = vec![];
        while let Ok(notice) = self.notice_receive.try_recv() {
            notices.push(notice);
        }
        notices
    }

    /// Waits for the next notice, `None` once the game is over and the feed is empty.
    pub async fn next_notice(&self) -> Option<InfoNotice> {
        self.notice_receive.recv().await.ok()
    }

    fn open(&self, pending: PendingRequest) -> Result<(), ReplyError> {
        let mut mailbox = lock(&self.mailbox);
        if mailbox.pending.is_some() {
            return Err(ReplyError::AlreadyPending(self.actor));
        }
        debug!("request {} to {}: {:?}", pending.id, self.actor, pending.request);
        mailbox.pending = Some(pending);
        Ok(())
    }

    /// Takes back a request nobody answered yet.
    fn withdraw(&self, id: RequestId) {
        let mut mailbox = lock(&self.mailbox);
        if mailbox.pending.as_ref().is_some_and(|p| p.id == id) {
            debug!("request {id} to {} withdrawn", self.actor);
            mailbox.pending = None;
        }
    }

    /// Lets the installed policy answer the request, if there is one.
    fn answer_with_policy(&self, id: RequestId) -> Option<Reply> {
        let mut mailbox = lock(&self.mailbox);
        let Mailbox {
            pending, policy, ..
        } = &mut *mailbox;
        let policy = policy.as_mut()?;
        if pending.as_ref().map(|p| p.id) != Some(id) {
            return None;
        }
        let pending = pending.take()?;
        let reply = policy.answer(&pending.request);
        debug!("{} answered {id} by policy: {reply:?}", self.actor);
        Some(reply)
    }

    async fn receive_reply(&self, id: RequestId) -> Result<Reply, GameOutcome> {
        loop {
            let (reply_id, reply) = self
                .reply_receive
                .recv()
                .await
                .map_err(|_| GameOutcome::new(GameOverReason::Aborted))?;
            if reply_id == id {
                return Ok(reply);
            }
            warn!("dropping reply for {reply_id}, waiting for {id}");
        }
    }

    fn kick(&self) -> KickOutcome {
        let mut mailbox = lock(&self.mailbox);
        mailbox.removed = true;
        let Mailbox {
            pending, policy, ..
        } = &mut *mailbox;
        let policy = policy.insert(Box::new(DefaultPrompter::new()));
        match pending.take() {
            Some(pending) => {
                let reply = policy.answer(&pending.request);
                info!("{} was kicked, answering {} with {reply:?}", self.actor, pending.id);
                if self.reply_send.try_send((pending.id, reply)).is_err() {
                    warn!("game already ended, kick reply dropped");
                }
                KickOutcome::Answered(pending.id)
            }
            None => KickOutcome::Idle,
        }
    }

    fn close(&self) {
        self.reply_send.close();
        self.notice_send.close();
    }
}

/// The actors sitting at one game, shared between the worker and everyone else.
#[derive(Debug, Default)]
pub struct Table {
    actors: Mutex<Vec<Arc<ActorChannel>>>,
    next_request_id: AtomicU64,
    cancelled: AtomicBool,
    checkpoint_requested: AtomicBool,
    latest_checkpoint: Mutex<Option<Vec<u8>>>,
    pub status: Arc<Status>,
}

impl Table {
    pub fn new() -> Arc<Self> {
        Arc::new(Table {
            next_request_id: AtomicU64::new(1),
            ..Default::default()
        })
    }

    fn next_actor_id(actors: &[Arc<ActorChannel>]) -> ActorId {
        ActorId(actors.iter().map(|a| a.actor.0 + 1).max().unwrap_or(0))
    }

    /// Seats a new actor. Players with a policy are bots.
    pub fn seat(
        &self,
        name: impl Into<String>,
        kind: ActorKind,
        policy: Option<Box<dyn Policy>>,
    ) -> Arc<ActorChannel> {
        let mut actors = lock(&self.actors);
        let actor = Self::next_actor_id(&actors);
        let channel = Arc::new(ActorChannel::new(
            actor,
            name.into(),
            kind,
            policy,
            self.status.clone(),
        ));
        info!("{} joins as {actor} ({kind:?})", channel.name);
        actors.push(channel.clone());
        drop(actors);
        self.status.bump();
        channel
    }

    /// Re-attaches a player under a known id, when restoring a checkpoint.
    pub fn attach_player(
        &self,
        actor: ActorId,
        name: impl Into<String>,
        policy: Option<Box<dyn Policy>>,
    ) -> Arc<ActorChannel> {
        let mut actors = lock(&self.actors);
        actors.retain(|a| a.actor != actor);
        let channel = Arc::new(ActorChannel::new(
            actor,
            name.into(),
            ActorKind::Player,
            policy,
            self.status.clone(),
        ));
        actors.push(channel.clone());
        actors.sort_by_key(|a| a.actor);
        channel
    }

    pub fn channel(&self, actor: ActorId) -> Option<Arc<ActorChannel>> {
        lock(&self.actors).iter().find(|a| a.actor == actor).cloned()
    }

    pub fn actors(&self) -> Vec<Arc<ActorChannel>> {
        lock(&self.actors).clone()
    }

    pub fn players(&self) -> Vec<Arc<ActorChannel>> {
        lock(&self.actors)
            .iter()
            .filter(|a| a.kind == ActorKind::Player)
            .cloned()
            .collect()
    }

    pub fn kibitzers(&self) -> Vec<Arc<ActorChannel>> {
        lock(&self.actors)
            .iter()
            .filter(|a| a.kind == ActorKind::Kibitzer)
            .cloned()
            .collect()
    }

    pub fn is_removed(&self, actor: ActorId) -> bool {
        self.channel(actor).map(|c| c.is_removed()).unwrap_or(true)
    }

    pub fn seqno(&self) -> u64 {
        self.status.seqno()
    }

    pub fn is_finished(&self) -> bool {
        self.status.state() == RunnerState::Ended
    }

    pub fn next_request_id(&self) -> u64 {
        self.next_request_id.load(Ordering::SeqCst)
    }

    pub fn set_next_request_id(&self, id: u64) {
        self.next_request_id.store(id, Ordering::SeqCst);
    }

    pub fn notify(&self, notice: InfoNotice) {
        let Some(channel) = self.channel(notice.target) else {
            warn!("notice to unknown actor {}: {}", notice.target, notice.message);
            return;
        };
        debug!("notice to {}: {notice}", notice.target);
        // unbounded, only fails once the game is closed
        let _ = channel.notice_send.try_send(notice);
        self.status.bump();
    }

    pub fn kick(&self, actor: ActorId) -> Result<KickOutcome, ReplyError> {
        let channel = self.channel(actor).ok_or(ReplyError::UnknownActor(actor))?;
        let outcome = channel.kick();
        for other in self.actors().iter().filter(|a| a.actor != actor) {
            self.notify(InfoNotice {
                target: other.actor,
                message: format!("{} was removed from the game", channel.name),
                cards: vec![],
            });
        }
        self.status.bump();
        Ok(outcome)
    }

    /// Wakes the worker with an abort, and every waiting observer.
    pub fn cancel(&self) {
        info!("cancelling the game");
        self.cancelled.store(true, Ordering::SeqCst);
        for actor in self.actors() {
            actor.reply_send.close();
        }
        self.status.bump();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn check_cancelled(&self) -> Result<(), GameOutcome> {
        if self.is_cancelled() {
            Err(GameOutcome::new(GameOverReason::Aborted))
        } else {
            Ok(())
        }
    }

    pub fn request_checkpoint(&self) {
        self.checkpoint_requested.store(true, Ordering::SeqCst);
    }

    pub fn take_checkpoint_request(&self) -> bool {
        self.checkpoint_requested.swap(false, Ordering::SeqCst)
    }

    pub fn store_checkpoint(&self, blob: Vec<u8>) {
        *lock(&self.latest_checkpoint) = Some(blob);
        self.status.bump();
    }

    pub fn latest_checkpoint(&self) -> Option<Vec<u8>> {
        lock(&self.latest_checkpoint).clone()
    }

    /// Closes every channel once the game is over.
    pub fn close(&self) {
        for actor in self.actors() {
            actor.close();
        }
    }

    fn open_request(
        &self,
        channel: &ActorChannel,
        request: DecisionRequest,
        error: Option<String>,
    ) -> Result<RequestId, GameOutcome> {
        self.check_cancelled()?;
        let id = RequestId(self.next_request_id.fetch_add(1, Ordering::SeqCst));
        channel
            .open(PendingRequest {
                id,
                actor: channel.actor,
                request,
                error,
            })
            .map_err(|e| {
                error!("{e}");
                GameOutcome::new(GameOverReason::Fault(e.to_string()))
            })?;
        self.status.bump();
        Ok(id)
    }

    async fn wait_reply(&self, channel: &ActorChannel, id: RequestId) -> Result<Reply, GameOutcome> {
        if let Some(reply) = channel.answer_with_policy(id) {
            self.status.bump();
            return Ok(reply);
        }
        channel.receive_reply(id).await
    }

    fn channel_or_fault(&self, actor: ActorId) -> Result<Arc<ActorChannel>, GameOutcome> {
        self.channel(actor).ok_or_else(|| {
            error!("no channel for {actor}");
            GameOutcome::new(GameOverReason::Fault(format!("no channel for {actor}")))
        })
    }

    /// Issues a request and waits for a valid reply. Invalid replies are
    /// refused and the request is issued again with the reason attached.
    pub async fn ask(&self, actor: ActorId, request: DecisionRequest) -> Result<Reply, GameOutcome> {
        let channel = self.channel_or_fault(actor)?;
        let mut error = None;
        loop {
            let id = self.open_request(&channel, request.clone(), error.take())?;
            let reply = self.wait_reply(&channel, id).await?;
            match request.validate(&reply) {
                Ok(()) => return Ok(reply),
                Err(e) => {
                    warn!("invalid reply from {actor} to {id}: {e}");
                    error = Some(e);
                }
            }
        }
    }

    /// Issues every request at once, each actor decides independently.
    /// Replies are returned in the order of the requests.
    pub async fn ask_each(
        &self,
        requests: Vec<(ActorId, DecisionRequest)>,
    ) -> Result<Vec<Reply>, GameOutcome> {
        let mut opened = Vec::with_capacity(requests.len());
        for (actor, request) in requests {
            let opening = self.channel_or_fault(actor).and_then(|channel| {
                let id = self.open_request(&channel, request.clone(), None)?;
                Ok((channel, id))
            });
            match opening {
                Ok((channel, id)) => opened.push((channel, request, id)),
                Err(outcome) => {
                    for (channel, _, id) in &opened {
                        channel.withdraw(*id);
                    }
                    self.status.bump();
                    return Err(outcome);
                }
            }
        }

        let mut replies = Vec::with_capacity(opened.len());
        for (channel, request, mut id) in opened {
            loop {
                let reply = self.wait_reply(&channel, id).await?;
                match request.validate(&reply) {
                    Ok(()) => {
                        replies.push(reply);
                        break;
                    }
                    Err(e) => {
                        warn!("invalid reply from {} to {id}: {e}", channel.actor);
                        id = self.open_request(&channel, request.clone(), Some(e))?;
                    }
                }
            }
        }
        Ok(replies)
    }
}

/// Drives the outside end of one actor's channel: shows notices and answers requests.
pub struct Client<E, P> {
    pub channel: Arc<ActorChannel>,
    pub table: Arc<Table>,
    pub event_handler: E,
    pub policy: P,
}

impl<E, P> Client<E, P>
where
    E: EventHandler,
    P: Policy,
{
    pub fn new(channel: Arc<ActorChannel>, table: Arc<Table>, event_handler: E, policy: P) -> Self {
        Client {
            channel,
            table,
            event_handler,
            policy,
        }
    }

    /// Handles everything currently waiting. Returns false once the game is over.
    pub fn handle_updates(&mut self) -> bool {
        for notice in self.channel.drain_notices() {
            self.event_handler.handle_notice(notice);
        }
        if let Some(pending) = self.channel.pending_request() {
            if pending.error.is_some() {
                self.event_handler.handle_refused(&pending);
            }
            let reply = self.policy.answer(&pending.request);
            if let Err(e) = self.channel.reply(pending.id, reply) {
                debug!("reply not accepted: {e}");
            }
        }
        !self.table.is_finished()
    }

    /// Blocks until the end of the game.
    pub fn run(mut self) -> Option<GameReport> {
        loop {
            let seqno = self.table.seqno();
            if !self.handle_updates() {
                break;
            }
            if self.channel.pending_request().is_none() {
                self.table.status.wait_for_update(seqno);
            }
        }
        // last notices
        for notice in self.channel.drain_notices() {
            self.event_handler.handle_notice(notice);
        }
        self.table.status.report()
    }
}

pub trait EventHandler {
    fn handle_notice(&mut self, notice: InfoNotice);

    /// The previous reply to this request was refused.
    fn handle_refused(&mut self, request: &PendingRequest) {
        warn!(
            "reply to {} refused: {}",
            request.id,
            request.error.as_deref().unwrap_or_default()
        );
    }
}

#[derive(Default)]
pub struct DefaultEventHandler {}
impl DefaultEventHandler {
    pub fn new() -> Self {
        Self {}
    }
}
impl EventHandler for DefaultEventHandler {
    fn handle_notice(&mut self, _notice: InfoNotice) {
        // do nothing
    }
}

/// Keeps every notice it receives.
#[derive(Debug, Default, Clone)]
pub struct CollectEventHandler {
    pub notices: Arc<Mutex<Vec<InfoNotice>>>,
}
impl CollectEventHandler {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn messages(&self) -> Vec<String> {
        lock(&self.notices).iter().map(|n| n.message.clone()).collect()
    }
}
impl EventHandler for CollectEventHandler {
    fn handle_notice(&mut self, notice: InfoNotice) {
        lock(&self.notices).push(notice);
    }
}
