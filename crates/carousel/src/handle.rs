//! Runtime attachment of a controller.
//!
//! One task owns the [`CarouselController`] and serializes renderer
//! commands, visibility changes and autoplay firings. Callers talk to it
//! through a [`CarouselHandle`].

use std::{future, sync::Arc};

use shared::{
    domain::{CarouselState, Item},
    error::CarouselError,
    protocol::{CarouselCommand, CarouselEvent, ChangeCause},
};
use tokio::{
    sync::{broadcast, mpsc, oneshot, watch},
    task::JoinHandle,
    time::{self, Instant},
};
use tracing::{debug, info};

use crate::controller::{CarouselController, CarouselOptions};

const COMMAND_QUEUE_DEPTH: usize = 64;
const EVENT_BUFFER: usize = 256;

struct Request {
    command: CarouselCommand,
    reply: oneshot::Sender<CarouselState>,
}

pub struct CarouselHandle {
    items: Arc<[Item]>,
    requests: mpsc::Sender<Request>,
    state: watch::Receiver<CarouselState>,
    events: broadcast::Sender<CarouselEvent>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl CarouselHandle {
    /// Builds a controller for `items` and starts the task that owns it.
    ///
    /// When `visibility` is given, its current value is applied right away and
    /// every later change is forwarded to the controller until the sender goes away.
    pub fn attach(
        items: Vec<Item>,
        options: CarouselOptions,
        visibility: Option<watch::Receiver<bool>>,
    ) -> Result<Self, CarouselError> {
        let mut controller = CarouselController::for_items(&items, options)?;
        let mut visibility = visibility;
        if let Some(signal) = visibility.as_mut() {
            let visible = *signal.borrow_and_update();
            controller.on_visibility_change(visible);
        }

        let (requests, request_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let (state_tx, state) = watch::channel(controller.snapshot());
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let (shutdown, shutdown_rx) = oneshot::channel();

        info!(
            items = items.len(),
            auto_playing = controller.is_auto_playing(),
            visible = controller.is_visible(),
            "carousel attached"
        );

        let task = tokio::spawn(run(
            controller,
            request_rx,
            visibility,
            shutdown_rx,
            state_tx,
            events.clone(),
        ));

        Ok(Self {
            items: items.into(),
            requests,
            state,
            events,
            shutdown: Some(shutdown),
            task: Some(task),
        })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn snapshot(&self) -> CarouselState {
        self.state.borrow().clone()
    }

    pub fn current_item(&self) -> Option<&Item> {
        let index = self.state.borrow().current_index?;
        self.items.get(index)
    }

    /// Every mutation, in order, tagged with its cause.
    pub fn subscribe(&self) -> broadcast::Receiver<CarouselEvent> {
        self.events.subscribe()
    }

    /// Latest snapshot only.
    pub fn watch(&self) -> watch::Receiver<CarouselState> {
        self.state.clone()
    }

    /// Sends one command and waits until the owning task has applied it.
    pub async fn send(&self, command: CarouselCommand) -> Result<CarouselState, CarouselError> {
        let (reply, reply_rx) = oneshot::channel();
        self.requests
            .send(Request { command, reply })
            .await
            .map_err(|_| CarouselError::Detached)?;
        reply_rx.await.map_err(|_| CarouselError::Detached)
    }

    pub async fn next(&self) -> Result<CarouselState, CarouselError> {
        self.send(CarouselCommand::Next).await
    }

    pub async fn prev(&self) -> Result<CarouselState, CarouselError> {
        self.send(CarouselCommand::Prev).await
    }

    pub async fn go_to(&self, index: i64) -> Result<CarouselState, CarouselError> {
        self.send(CarouselCommand::GoTo { index }).await
    }

    pub async fn set_auto_playing(&self, enabled: bool) -> Result<CarouselState, CarouselError> {
        self.send(CarouselCommand::SetAutoPlaying { enabled }).await
    }

    pub async fn on_visibility_change(
        &self,
        visible: bool,
    ) -> Result<CarouselState, CarouselError> {
        self.send(CarouselCommand::VisibilityChanged { visible })
            .await
    }

    pub async fn pointer_enter(&self) -> Result<CarouselState, CarouselError> {
        self.send(CarouselCommand::PointerEnter).await
    }

    pub async fn pointer_leave(&self) -> Result<CarouselState, CarouselError> {
        self.send(CarouselCommand::PointerLeave).await
    }

    /// Stops the owning task and waits for it; no firing can happen afterwards.
    pub async fn detach(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run(
    mut controller: CarouselController,
    mut requests: mpsc::Receiver<Request>,
    mut visibility: Option<watch::Receiver<bool>>,
    mut shutdown: oneshot::Receiver<()>,
    state: watch::Sender<CarouselState>,
    events: broadcast::Sender<CarouselEvent>,
) {
    loop {
        let deadline = controller.next_deadline();
        tokio::select! {
            _ = &mut shutdown => break,
            request = requests.recv() => {
                let Some(Request { command, reply }) = request else {
                    break;
                };
                let name = command.name();
                match controller.apply(&command) {
                    Some(cause) => publish(&controller, cause, &state, &events),
                    None => debug!(command = name, "carousel command absorbed"),
                }
                let _ = reply.send(controller.snapshot());
            }
            changed = next_visibility(&mut visibility) => match changed {
                Some(visible) => {
                    if controller.on_visibility_change(visible) {
                        publish(&controller, ChangeCause::Visibility, &state, &events);
                    }
                }
                None => visibility = None,
            },
            _ = sleep_until(deadline) => {
                if controller.fire_autoplay(Instant::now()) {
                    publish(&controller, ChangeCause::Autoplay, &state, &events);
                } else {
                    state.send_replace(controller.snapshot());
                }
            }
        }
    }

    state.send_replace(controller.detach());
    let _ = events.send(CarouselEvent::Detached);
    info!("carousel detached");
}

fn publish(
    controller: &CarouselController,
    cause: ChangeCause,
    state: &watch::Sender<CarouselState>,
    events: &broadcast::Sender<CarouselEvent>,
) {
    let snapshot = controller.snapshot();
    debug!(
        ?cause,
        index = ?snapshot.current_index,
        direction = snapshot.direction.sign(),
        armed = snapshot.timer_armed,
        "carousel state changed"
    );
    state.send_replace(snapshot.clone());
    let _ = events.send(CarouselEvent::StateChanged {
        cause,
        state: snapshot,
    });
}

async fn next_visibility(signal: &mut Option<watch::Receiver<bool>>) -> Option<bool> {
    match signal {
        Some(signal) => match signal.changed().await {
            Ok(()) => Some(*signal.borrow_and_update()),
            Err(_) => None,
        },
        None => future::pending().await,
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}
