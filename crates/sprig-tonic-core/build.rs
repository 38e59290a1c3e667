/// Builds the gRPC client and server code for the `sprig.proto` definition
/// using `tonic-prost-build`.
///
/// This code generation step processes the Protocol Buffer definitions located
/// in the `proto` directory and emits Rust modules with gRPC bindings into the
/// crate's `OUT_DIR`. A file descriptor set is written alongside the bindings
/// so the server can expose gRPC reflection.
///
/// # Files and Paths
///
/// - Proto file: `proto/sprig.proto`
/// - Includes: `proto/`
/// - Descriptor set: `OUT_DIR/sprig_descriptor.bin`
///
/// # Panics
///
/// This function will `panic!` if code generation fails. For CI use or better
/// diagnostics, wrap with a proper error handler or logging.
///
/// # Output
///
/// Generated code will be accessible in Rust via:
///
/// ```rust
/// pub mod sprig {
///     tonic::include_proto!("sprig");
/// }
/// ```
///
/// This module will include both gRPC service traits and message types.
use std::env;
use std::path::PathBuf;
fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = out_dir.join("sprig_descriptor.bin");

    let mut config = tonic_prost_build::Config::new();
    config.file_descriptor_set_path(&descriptor_path);

    tonic_prost_build::configure()
        .compile_with_config(config, &["proto/sprig.proto"], &["proto"])
        .unwrap();
}
