use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Sender, TrySendError};

use super::decoder::decode;
use super::event::Event;
use super::tokenizer::{Phase, Tokenizer, TokenizerAction, PAYLOAD_CAPACITY};

/// Consumer of decoded events. Called synchronously, in arrival order, from
/// whichever task is reading the modem.
pub trait EventHandler {
    fn handle(&mut self, event: Event);
}

impl<F: FnMut(Event)> EventHandler for F {
    fn handle(&mut self, event: Event) {
        self(event)
    }
}

/// Forwards events into an embassy channel, so they can be consumed by
/// another task. Events are dropped when the channel is full.
pub struct EventSender<'ch, M: RawMutex, const N: usize>(pub Sender<'ch, M, Event, N>);

impl<'ch, M: RawMutex, const N: usize> EventHandler for EventSender<'ch, M, N> {
    fn handle(&mut self, event: Event) {
        if let Err(TrySendError::Full(event)) = self.0.try_send(event) {
            warn!("Event channel full, dropping {:?}", event.kind());
        }
    }
}

/// The incoming half of the modem link: bytes in, events out.
pub struct Ingress<H, const N: usize = PAYLOAD_CAPACITY> {
    tokenizer: Tokenizer<N>,
    handler: H,
}

impl<H: EventHandler, const N: usize> Ingress<H, N> {
    pub const fn new(handler: H) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            handler,
        }
    }

    pub fn feed(&mut self, byte: u8) {
        if let TokenizerAction::Emit(unit) = self.tokenizer.feed(byte) {
            match decode(&unit) {
                Some(event) => {
                    debug!("Dispatching {:?}", event.kind());
                    self.handler.handle(event);
                }
                None => trace!("Unit {:?} produced no event", unit.kind),
            }
        }
    }

    pub fn ingest(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.feed(b);
        }
    }

    pub fn phase(&self) -> Phase {
        self.tokenizer.phase()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }
}
