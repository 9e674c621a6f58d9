//! Command-line front end for wizctl.
//!
//! ```text
//! wiz -r Office -c 255,120,0 -u 60     # every bulb in the Office
//! wiz -i 192.168.1.20 -q               # one bulb by address, off
//! wiz -b -s ocean                      # the whole subnet
//! wiz -d 2,8                           # discovery
//! ```
//!
//! Set `RUST_LOG=debug` to see every datagram.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use wizctl::{
    AddressPolicy, Color, Device, Dimming, DiscoveryOptions, Dispatcher, Error, Kelvin,
    LightRequest, Operation, Speed, Transport, directory,
};

#[derive(Parser)]
#[command(name = "wiz")]
#[command(about = "Control WiZ smart bulbs on the local network", long_about = None)]
struct Cli {
    /// Broadcast the command to every bulb on the subnet
    #[arg(short, long)]
    broadcast: bool,

    /// Color as R,G,B or one of r, g, b, red, green, blue
    #[arg(short, long, value_name = "COLOR")]
    color: Option<Color>,

    /// Brightness in percent (clamped to 0-100)
    #[arg(short = 'u', long, value_name = "PERCENT", allow_negative_numbers = true)]
    dimming: Option<i64>,

    /// Discover bulbs: seconds to wait per reply, and how many replies to accept
    #[arg(short, long, value_name = "TIMEOUT,MAX_DEVS")]
    discover: Option<DiscoveryOptions>,

    /// Comma-separated list of device IP addresses
    #[arg(short, long, value_name = "ADDRESS")]
    ips: Option<String>,

    /// Color temperature in Kelvin (clamped to 2000-8999)
    #[arg(short, long, value_name = "KELVIN", allow_negative_numbers = true)]
    kelvin: Option<i64>,

    /// List the directory devices the command is sent to
    #[arg(short, long)]
    list: bool,

    /// Device name or comma-separated list of names
    #[arg(short, long, value_name = "NAME")]
    name: Option<String>,

    /// Turn the bulbs off
    #[arg(short = 'q', long)]
    off: bool,

    /// Turn the bulbs on
    #[arg(short, long)]
    on: bool,

    /// Number of extra times to send the command
    #[arg(short = 't', long, value_name = "N", default_value_t = 0)]
    repeat: usize,

    /// Room name or comma-separated list of rooms
    #[arg(short, long, value_name = "ROOM")]
    room: Option<String>,

    /// Scene name, e.g. ocean, sunset, warm_white
    #[arg(short, long, value_name = "SCENE")]
    scene: Option<String>,

    /// Transition speed for dynamic scenes (clamped to 10-200)
    #[arg(short = 'v', long, value_name = "SPEED", allow_negative_numbers = true)]
    speed: Option<i64>,

    /// Device directory file
    #[arg(short, long, env = "WIZ_PATH", default_value = directory::DEFAULT_DIRECTORY)]
    file: PathBuf,

    /// Stop at the first malformed device address
    #[arg(long)]
    fail_fast: bool,
}

impl Cli {
    fn request(&self) -> Result<LightRequest, Error> {
        let mut request = LightRequest::new();
        if let Some(color) = self.color {
            request.color(color);
        }
        if let Some(kelvin) = self.kelvin {
            request.kelvin(Kelvin::clamped(kelvin));
        }
        if let Some(scene) = &self.scene {
            request.scene_name(scene)?;
        }
        if let Some(dimming) = self.dimming {
            request.dimming(Dimming::clamped(dimming));
        }
        if let Some(speed) = self.speed {
            request.speed(Speed::clamped(speed));
        }
        if self.off {
            request.off();
        }
        if self.on {
            request.on();
        }
        Ok(request)
    }

    /// Listing only covers devices read from the directory file.
    fn lists_devices(&self) -> bool {
        self.list && self.ips.is_none()
    }

    fn policy(&self) -> AddressPolicy {
        if self.fail_fast {
            AddressPolicy::FailFast
        } else {
            AddressPolicy::BestEffort
        }
    }
}

fn print_devices(devices: &[Device]) {
    println!("Devices");
    println!("NAME\tIP ADDRESS\tROOM");
    for device in devices {
        match device.room() {
            Some(room) => println!("{}\t{}\t{}", device.name(), device.ip(), room),
            None => println!("{}\t{}", device.name(), device.ip()),
        }
    }
}

async fn run(cli: Cli) -> Result<(), Error> {
    let transport = Transport::default();

    if let Some(options) = cli.discover {
        for _ in 0..=cli.repeat {
            let replies = transport.discover_bulbs(&options).await?;
            for reply in replies {
                println!("{}", reply.ip());
            }
        }
        return Ok(());
    }

    let op = Operation::from_request(&cli.request()?);
    debug!("resolved operation: {op:?}");
    let dispatcher = Dispatcher::new(transport)
        .policy(cli.policy())
        .repeat(cli.repeat);

    if cli.broadcast {
        return dispatcher.broadcast(&op).await;
    }

    let devices = match &cli.ips {
        Some(ips) => directory::parse_ips(ips)?,
        None => directory::load(&cli.file, cli.name.as_deref(), cli.room.as_deref())?,
    };
    if cli.lists_devices() {
        print_devices(&devices);
    }

    dispatcher.dispatch(&devices, &op).await?.into_result()?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("wiz: {e}");
            ExitCode::FAILURE
        }
    }
}
