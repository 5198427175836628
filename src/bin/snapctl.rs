// snapctl: list, show and clean stored snapshots.
// Usage: cargo run --bin snapctl -- [--root testdata/snapshots] <list|show|clean>

fn main() {
    snapcheck::cli::run();
}
