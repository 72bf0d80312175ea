use std::fmt::Write;

use trussreact::Structure;

/// Render a textual summary of the beams and support reactions.
///
/// The total beam weight is printed next to the summed reactions so readers
/// can check vertical equilibrium by eye.
#[must_use]
pub fn render_summary(structure: &Structure) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Structure: {} joints ({} supports), {} beams",
        structure.joint_count(),
        structure.support_count(),
        structure.beam_count()
    )
    .expect("writing to string cannot fail");

    let mut total_weight = 0.0;
    for beam in structure.beams() {
        let (Some(centre), Some(mass), Some(weight)) = (
            structure.beam_centre(beam),
            structure.beam_mass(beam),
            structure.beam_weight(beam),
        ) else {
            continue;
        };
        total_weight += weight;
        writeln!(
            &mut output,
            "Beam {}: mass = {mass:.2} kg, weight = {weight:.2} N at x = {:+.2} m",
            beam.index(),
            centre.x
        )
        .expect("writing to string cannot fail");
    }

    let mut total_reaction = 0.0;
    for support in structure.supports() {
        let (Some(position), Some(force)) = (
            structure.position(support),
            structure.vertical_force(support),
        ) else {
            continue;
        };
        total_reaction += force;
        writeln!(
            &mut output,
            "Support {} at ({:+.2}, {:+.2}) m: vertical reaction = {force:.2} N",
            support.index(),
            position.x,
            position.y
        )
        .expect("writing to string cannot fail");
    }

    writeln!(
        &mut output,
        "Total beam weight = {total_weight:.2} N, total reaction = {total_reaction:.2} N"
    )
    .expect("writing to string cannot fail");

    output
}
