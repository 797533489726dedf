//! Face visibility inspection command.

use clap::Args;
use foilcard_core::{FaceVisibility, Rotation};

#[derive(Args)]
pub struct GeometryArgs {
    /// Rotation around the X axis in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    x: f64,

    /// Rotation around the Y axis in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    y: f64,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn run(args: GeometryArgs) -> anyhow::Result<()> {
    let vis = FaceVisibility::from_rotation(Rotation::new(args.x, args.y));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&vis)?);
        return Ok(());
    }

    let r = vis.rotation;
    println!("Rotation  x={:.1}  y={:.1} (normalized)", r.x, r.y);
    println!();
    println!("  front   {:.3}", vis.front);
    println!("  back    {:.3}", vis.back);
    println!("  left    {:.3}", vis.left);
    println!("  right   {:.3}", vis.right);
    println!("  top     {:.3}", vis.top);
    println!("  bottom  {:.3}", vis.bottom);
    println!();
    println!("Visible face: {:?}", vis.visible_face);
    Ok(())
}
