// End-to-end tests for the Audiobook Backend API
//
// The full router is driven in-process via tower's oneshot with the speech
// backend replaced by an in-memory stub, so no network and no real
// synthesis provider is involved. Each test builds its own app with its own
// staging directory, allowing tests to run in parallel without conflicts.

mod test_catalog;
mod test_convert;
mod test_health;
