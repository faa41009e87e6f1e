use flagconf::{Accessor, Config};
use tracing_subscriber::EnvFilter;

const DEFAULTS: &str = r#"
[server]
listen = "0.0.0.0"
port = 8080
read-timeout = "2.5s"
trusted = ["10.0.0.0/8", "192.168.0.0/16"]

[auth]
secret = "c2VjcmV0"
"#;

fn main() -> Result<(), flagconf::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // defaults -> local overrides -> plugin file mounted below plugins.fetcher
    let config = Config::builder()
        .with_toml(DEFAULTS)
        .with_file("demos/local.toml", false)
        .with_file_at("demos/fetcher.toml", false, ["plugins", "fetcher"])
        .build()?;
    let settings = Accessor::new(config);

    println!("listen:       {:?}", settings.get_ip("server.listen")?);
    println!("port:         {}", settings.get_u16("server.port")?);
    println!("read timeout: {:?}", settings.get_duration("server.read-timeout")?);
    println!("trusted:      {:?}", settings.get_ip_net_slice("server.trusted")?);
    println!("secret:       {} bytes", settings.get_bytes_base64("auth.secret")?.len());

    match settings.get_count("plugins.fetcher.retries") {
        Ok(retries) => println!("retries:      {retries}"),
        Err(err) => println!("retries:      {err}"),
    }

    Ok(())
}
