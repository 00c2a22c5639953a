pub struct ErrorCode;

impl ErrorCode {
    // Config errors: C1xx
    pub const CONFIG_READ_FAILED: &'static str = "C100";
    pub const CONFIG_PARSE_FAILED: &'static str = "C101";

    // Container registry errors: R1xx
    pub const REGISTRY_UNAVAILABLE: &'static str = "R100";
    pub const CONTAINER_START_FAILED: &'static str = "R101";
    pub const CONTAINER_STOP_FAILED: &'static str = "R102";

    // Project errors: P1xx
    pub const PROJECT_LIST_FAILED: &'static str = "P100";
    pub const PROJECT_NOT_FOUND: &'static str = "P101";

    pub const INTERNAL: &'static str = "E000";
}
