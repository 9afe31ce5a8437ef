// Build script to compile Protocol Buffer definitions

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use the vendored protoc unless the caller pinned one explicitly
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    // Compile protobuf files (server stubs for record-service, client stubs
    // for record-gateway)
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["../../proto/records.proto"], &["../../proto/"])?;

    // Tell Cargo to rerun if proto files change
    println!("cargo:rerun-if-changed=../../proto/records.proto");

    Ok(())
}
