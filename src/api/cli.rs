use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser};
use serde::Serialize;
use tracing::info;

use crate::core::{
    AllocationSource, AllocationState, ChartArea, CrosshairLine, InvestmentParameters,
    LoanParameters, OverlayController, ParameterError, PointerEvent, PointerState, project,
};

use super::{ProjectResponse, build_project_response};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "invest-o-mortgage",
    about = "Project a mortgage balance against a portfolio funded with spare cash"
)]
pub struct Cli {
    #[arg(long, default_value_t = 1_000_000.0, help = "Amount borrowed")]
    pub principal: f64,
    #[arg(long, default_value_t = 30, help = "Loan term in years")]
    pub loan_length: u32,
    #[arg(long, default_value_t = 2.0, help = "Annual interest rate in percent")]
    pub interest_rate: f64,
    #[arg(long, default_value_t = 0.0, help = "Extra principal paid each month")]
    pub additional_principal: f64,
    #[arg(long, default_value_t = 0.0)]
    pub investment_start: f64,
    #[arg(long, default_value_t = 500.0, help = "Amount invested each month")]
    pub additional_investment: f64,
    #[arg(
        long,
        default_value_t = 10.0,
        allow_negative_numbers = true,
        help = "Expected annual return in percent, may be negative"
    )]
    pub annual_roi: f64,
    #[arg(
        long,
        help = "Combined monthly budget split between extra principal and investment"
    )]
    pub additional_payment: Option<f64>,
    #[arg(
        long,
        help = "Share of --additional-payment that is invested, in percent; defaults to the split implied by --additional-investment"
    )]
    pub investment_proportion: Option<f64>,
    #[arg(long, default_value_t = false, help = "Pretty-print JSON output")]
    pub pretty: bool,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            principal: 1_000_000.0,
            loan_length: 30,
            interest_rate: 2.0,
            additional_principal: 0.0,
            investment_start: 0.0,
            additional_investment: 500.0,
            annual_roi: 10.0,
            additional_payment: None,
            investment_proportion: None,
            pretty: false,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
pub struct CrosshairArgs {
    #[arg(long)]
    pub top: f64,
    #[arg(long)]
    pub bottom: f64,
    #[arg(long)]
    pub left: f64,
    #[arg(long)]
    pub right: f64,
    #[arg(long, help = "Upper bound of the month axis, enables the month readout")]
    pub x_max: Option<u32>,
}

#[derive(Parser, Debug)]
#[command(name = "crosshair", about = "Replay pointer events read from stdin")]
struct CrosshairCli {
    #[command(flatten)]
    args: CrosshairArgs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRequest {
    pub loan: LoanParameters,
    pub investment: InvestmentParameters,
    pub allocation: Option<AllocationState>,
}

pub fn build_request(cli: &Cli) -> Result<ProjectionRequest, ParameterError> {
    let loan = LoanParameters {
        principal: cli.principal,
        loan_length_years: cli.loan_length,
        annual_interest_rate_percent: cli.interest_rate,
        additional_principal: cli.additional_principal,
    };
    loan.validate()?;

    let investment = InvestmentParameters {
        investment_start: cli.investment_start,
        additional_investment: cli.additional_investment,
        annual_roi_percent: cli.annual_roi,
    };
    investment.validate()?;

    let allocation = match cli.additional_payment {
        None => None,
        Some(additional_payment) => {
            AllocationState {
                additional_payment,
                additional_principal: 0.0,
                additional_investment: 0.0,
                investment_proportion_percent: cli.investment_proportion,
            }
            .validate()?;

            let mut state = AllocationState::new(additional_payment);
            match cli.investment_proportion {
                Some(percent) => state.set_from_proportion(percent),
                None => state.set_from_absolute(
                    AllocationSource::Investment,
                    cli.additional_investment,
                ),
            }
            Some(state)
        }
    };

    Ok(ProjectionRequest {
        loan,
        investment,
        allocation,
    })
}

pub fn run_project<W: Write>(args: &[String], mut out: W) -> Result<()> {
    let cli = Cli::parse_from(args);
    let request = build_request(&cli)?;
    info!(
        principal = request.loan.principal,
        years = request.loan.loan_length_years,
        allocator = request.allocation.is_some(),
        "running projection"
    );

    let projection = project(
        &request.loan,
        &request.investment,
        request.allocation.as_ref(),
    );
    let response = build_project_response(&projection, request.allocation);
    write_json(&mut out, &response, cli.pretty)
}

fn write_json<W: Write>(out: &mut W, response: &ProjectResponse, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, response)?;
    } else {
        serde_json::to_writer(&mut *out, response)?;
    }
    writeln!(out)?;
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerReport {
    pub pointer: PointerState,
    pub crosshair: Option<CrosshairLine>,
    pub month: Option<u32>,
}

pub fn pointer_report(
    controller: &OverlayController,
    area: ChartArea,
    x_max: Option<u32>,
) -> PointerReport {
    let crosshair = controller.crosshair(area);
    PointerReport {
        pointer: controller.state(),
        crosshair,
        month: crosshair
            .zip(x_max)
            .and_then(|(line, x_max)| area.month_at(line.x, x_max)),
    }
}

fn parse_pointer_line(line: &str) -> Result<PointerEvent> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("leave") {
        return Ok(PointerEvent::Leave);
    }
    let mut parts = trimmed.split_whitespace();
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected `x y` or `leave`, got {trimmed:?}");
    };
    let x = x.parse::<f64>().with_context(|| format!("invalid x coordinate {x:?}"))?;
    let y = y.parse::<f64>().with_context(|| format!("invalid y coordinate {y:?}"))?;
    Ok(PointerEvent::Move { x, y })
}

pub fn run_crosshair<R: BufRead, W: Write>(args: &[String], input: R, out: W) -> Result<()> {
    let cli = CrosshairCli::parse_from(args);
    replay_pointer_events(cli.args, input, out)
}

/// One JSON line out per pointer line in, flushed before the next event is read.
pub fn replay_pointer_events<R: BufRead, W: Write>(
    args: CrosshairArgs,
    input: R,
    mut out: W,
) -> Result<()> {
    let area = ChartArea {
        top: args.top,
        bottom: args.bottom,
        left: args.left,
        right: args.right,
    };
    area.validate()?;
    info!(?area, "replaying pointer events");

    let mut controller = OverlayController::new();
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let event = parse_pointer_line(&line).with_context(|| format!("line {}", idx + 1))?;
        controller.handle_pointer_event(event, area);
        serde_json::to_writer(&mut out, &pointer_report(&controller, area, args.x_max))?;
        writeln!(out)?;
        out.flush()?;
    }
    Ok(())
}
