//! # Tip & Split Command-Line Entry Point
//!
//! ```text
//! tipsplit --bill 100 --tip 10 --people 4 --round-up
//!     │
//!     ▼
//! main.rs ────► tipsplit_cli::run()
//!                 ├── init tracing
//!                 ├── load TIPSPLIT_* config
//!                 ├── replay arguments into a BillForm
//!                 └── print the receipt
//! ```

fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for better testability
    tipsplit_cli::run()
}
