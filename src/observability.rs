use biometrics::{Collector, Counter};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("deskmate.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("deskmate.client.request_errors");

pub(crate) static POLL_TICKS: Counter = Counter::new("deskmate.poll.ticks");
pub(crate) static POLL_HEALTH_FAILURES: Counter = Counter::new("deskmate.poll.health_failures");
pub(crate) static POLL_STATS_FAILURES: Counter = Counter::new("deskmate.poll.stats_failures");
pub(crate) static POLL_STALE_DROPS: Counter = Counter::new("deskmate.poll.stale_drops");

pub(crate) static CHAT_SENDS: Counter = Counter::new("deskmate.chat.sends");
pub(crate) static CHAT_SEND_ERRORS: Counter = Counter::new("deskmate.chat.send_errors");
pub(crate) static CHAT_SENDS_BLOCKED: Counter = Counter::new("deskmate.chat.sends_blocked");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);

    collector.register_counter(&POLL_TICKS);
    collector.register_counter(&POLL_HEALTH_FAILURES);
    collector.register_counter(&POLL_STATS_FAILURES);
    collector.register_counter(&POLL_STALE_DROPS);

    collector.register_counter(&CHAT_SENDS);
    collector.register_counter(&CHAT_SEND_ERRORS);
    collector.register_counter(&CHAT_SENDS_BLOCKED);
}
