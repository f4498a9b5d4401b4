use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use rs_dh_kinematics::batch::{calculate_ik, calculate_ik_parallel, BatchSolution};
use rs_dh_kinematics::ik_error::IkError;
use rs_dh_kinematics::kinematics_impl::DHKinematics;
use rs_dh_kinematics::parameters::dh_kinematics::LinkGeometry;
use rs_dh_kinematics::pose_file::read_poses_file;
use rs_dh_kinematics::utils::format_joints;

/// Solve inverse kinematics for a batch of gripper poses read from YAML file.
/// Prints one line of joint angles per pose, NaN for poses that could not be solved.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file with the list of poses
    poses: PathBuf,

    /// YAML file with the link geometry. KUKA KR210 if not given.
    #[arg(long)]
    robot: Option<PathBuf>,

    /// Print joint angles in degrees rather than radians
    #[arg(long)]
    degrees: bool,

    /// Solve poses on all cores
    #[arg(long)]
    parallel: bool,
}

fn run(args: &Args) -> Result<ExitCode> {
    let geometry = match &args.robot {
        Some(path) => LinkGeometry::from_yaml_file(path)
            .with_context(|| format!("Failed to read link geometry from {}", path.display()))?,
        None => LinkGeometry::kr210(),
    };
    let robot = DHKinematics::new(geometry);

    let poses = read_poses_file(&args.poses)
        .with_context(|| format!("Failed to read poses from {}", args.poses.display()))?;

    let solved = if args.parallel {
        calculate_ik_parallel(&robot, &poses)
    } else {
        calculate_ik(&robot, &poses)
    };

    match &solved {
        Ok(batch) => {
            for joints in batch.joint_trajectory() {
                println!("{}", format_joints(&joints, args.degrees));
            }
            if batch.failures() > 0 {
                eprintln!("{} of {} poses not solved", batch.failures(), batch.len());
            }
        }
        Err(err) => error!("{}", err),
    }
    Ok(ExitCode::from(exit_status(&solved)))
}

/// Process exit status for the outcome of a batch: 255 (the -1 sentinel as seen by a shell)
/// for an empty request, 1 if any pose was not solved.
fn exit_status(solved: &Result<BatchSolution, IkError>) -> u8 {
    match solved {
        Ok(batch) if batch.failures() == 0 => 0,
        Ok(_) => 1,
        Err(err @ IkError::NoPoses) => err.status_code() as u8,
        Err(_) => 1,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
