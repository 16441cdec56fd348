mod ban_api_mock;
mod check_flow;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - ban_api_mock: the HTTP client against a local stand-in for the ban API
// - check_flow: validation, lookup and language selection without Discord
// - liveness: the health-check endpoint served on its own thread
// - smoke_tests: basic wiring checks
