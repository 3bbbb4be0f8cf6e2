fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Protobuf code is only needed by the gRPC service.
    #[cfg(feature = "grpc")]
    {
        println!("cargo:rerun-if-changed=proto/themes.proto");
        tonic_build::configure()
            .build_server(true)
            .build_client(true)
            .compile(&["proto/themes.proto"], &["proto"])?;
    }
    Ok(())
}
