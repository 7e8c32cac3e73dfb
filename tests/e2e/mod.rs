// End-to-end tests for the API error responses
//
// Each test starts the router on an ephemeral port and talks to it over real
// HTTP, so the trace id middleware, the fallback and the JSON error bodies are
// exercised exactly as a client sees them.

mod helpers;
