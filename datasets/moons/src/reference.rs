//! The fixed golden two-moons reference dataset.
//!
//! A hardcoded 300-point table (150 per class) reproducing the canonical
//! noiseless two-moons arcs. It exists so that benchmarks and tests can rely
//! on a bit-exact distribution; it is never derived from [`MoonsGenerator`].
//!
//! Unlike the generator's separation offset, the `offset` here is a uniform
//! additive shift applied to *both* coordinates of every point, before all
//! coordinates are divided by `downscale`. The two semantics are intentionally
//! kept distinct.
//!
//! [`MoonsGenerator`]: crate::MoonsGenerator

use crate::MoonsError;
use moonbench_helpers::{DataPoint, Float};
use ndarray::array;

/// Number of points per class in the golden table.
pub const REFERENCE_POINTS_PER_CLASS: usize = 150;

/// Golden coordinates: rows 0..150 are class 0, rows 150..300 are class 1.
pub(crate) const GOLDEN: [[f64; 2]; 300] = [
    [1.0, 0.0],
    [0.9997777298596181, 0.021082952277811057],
    [0.9991110182465031, 0.04215653233409721],
    [0.9980001615408226, 0.06321137211366354],
    [0.9964456535631284, 0.08423811189212299],
    [0.9944481853548335, 0.1052274044366709],
    [0.9920086448710159, 0.12616991916130652],
    [0.9891281165856873, 0.1470563462746542],
    [0.9858078810097003, 0.16787740091854086],
    [0.9820494141215101, 0.18862382729548932],
    [0.9778543867110426, 0.20928640278329308],
    [0.9732246636369604, 0.2298559420348435],
    [0.9681623029976587, 0.25032330106138656],
    [0.9626695552163577, 0.2706793812973941],
    [0.956748862040698, 0.29091513364524274],
    [0.9504028554572863, 0.31102156249790225],
    [0.9436343565216709, 0.3309897297378454],
    [0.9364463741042691, 0.35081075871040096],
    [0.9288421035528028, 0.3704758381697844],
    [0.9208249252718379, 0.38997622619605166],
    [0.9123984032200585, 0.4093032540812346],
    [0.903566283325943, 0.4284483301829307],
    [0.8943324918225494, 0.44740294374363443],
    [0.8847011335021446, 0.46615866867411193],
    [0.8746764898914609, 0.4847071672991366],
    [0.8642630173483832, 0.503040194063922],
    [0.8534653450809199, 0.5211495991996026],
    [0.8422882730893321, 0.5390273323461351],
    [0.8307367700323411, 0.5566654461310071],
    [0.8188159710183592, 0.5740560997021646],
    [0.806531175322727, 0.5911915622135863],
    [0.793887844031972, 0.6080642162619564],
    [0.7808915976161361, 0.6246665612729071],
    [0.7675482134302499, 0.6409912168353257],
    [0.7538636231460657, 0.6570309259822453],
    [0.7398439101151906, 0.6727785584168582],
    [0.7254953066647915, 0.6882271136822207],
    [0.7108241913270748, 0.7033697242732376],
    [0.6958370860037719, 0.7181996586895453],
    [0.680540653066891, 0.7327103244279348],
    [0.6649416923970247, 0.7468952709129846],
    [0.6490471383605286, 0.7607481923646016],
    [0.6328640567269168, 0.7742629306011943],
    [0.6163996415278424, 0.7874334777772325],
    [0.5996612118590605, 0.8002539790539769],
    [0.5826562086267956, 0.8127187352021904],
    [0.565392191239959, 0.8248222051356751],
    [0.5478768342496868, 0.8365590083745086],
    [0.5301179239376935, 0.8479239274368838],
    [0.5121233548549551, 0.8589119101584899],
    [0.4939011263122635, 0.8695180719384028],
    [0.47545933882421176, 0.8797376979104871],
    [0.45680619050818716, 0.8895662450393438],
    [0.4379499734399796, 0.8989993441398726],
    [0.41889906996761855, 0.9080328018195511],
    [0.3996619489850822, 0.9166626023425661],
    [0.3802471621675337, 0.92488490941497],
    [0.36066334016975554, 0.9326960678900684],
    [0.3409191887894769, 0.9400926053932799],
    [0.32102348509729633, 0.9470712338657457],
    [0.30098507353491877, 0.9536288510260056],
    [0.2808128619834461, 0.959762541749086],
    [0.26051581780346544, 0.9654695793623906],
    [0.24010296384869487, 0.9707474268578168],
    [0.21958337445496295, 0.9755937380195567],
    [0.19896617140629977, 0.9800063584670862],
    [0.17826051987993694, 0.9839833266128724],
    [0.1574756243720178, 0.9875228745343791],
    [0.13662072460582664, 0.9906234287599799],
    [0.11570509142436129, 0.9932836109684284],
    [0.09473802266906836, 0.9955022386015789],
    [0.0737288390465789, 0.9972783253900807],
    [0.0526868799852795, 0.9986110817918139],
    [0.031621499483558885, 0.9994999153428735],
    [0.010542061951579447, 0.9999444309209432],
    [-0.010542061951579548, 0.9999444309209432],
    [-0.03162149948355876, 0.9994999153428735],
    [-0.05268687998527938, 0.9986110817918139],
    [-0.073728839046579, 0.9972783253900807],
    [-0.09473802266906824, 0.995502238601579],
    [-0.11570509142436117, 0.9932836109684284],
    [-0.13662072460582653, 0.9906234287599799],
    [-0.15747562437201768, 0.9875228745343791],
    [-0.17826051987993705, 0.9839833266128724],
    [-0.19896617140629966, 0.9800063584670862],
    [-0.21958337445496282, 0.9755937380195567],
    [-0.24010296384869473, 0.9707474268578168],
    [-0.2605158178034651, 0.9654695793623908],
    [-0.2808128619834458, 0.959762541749086],
    [-0.30098507353491866, 0.9536288510260056],
    [-0.32102348509729617, 0.9470712338657458],
    [-0.3409191887894768, 0.9400926053932799],
    [-0.3606633401697552, 0.9326960678900685],
    [-0.38024716216753335, 0.9248849094149701],
    [-0.39966194898508234, 0.9166626023425661],
    [-0.41889906996761866, 0.908032801819551],
    [-0.4379499734399795, 0.8989993441398727],
    [-0.45680619050818727, 0.8895662450393438],
    [-0.4754593388242115, 0.8797376979104872],
    [-0.49390112631226346, 0.8695180719384029],
    [-0.512123354854955, 0.8589119101584899],
    [-0.5301179239376936, 0.8479239274368837],
    [-0.5478768342496868, 0.8365590083745087],
    [-0.5653921912399589, 0.8248222051356752],
    [-0.5826562086267957, 0.8127187352021904],
    [-0.5996612118590603, 0.8002539790539771],
    [-0.6163996415278423, 0.7874334777772326],
    [-0.6328640567269166, 0.7742629306011946],
    [-0.6490471383605284, 0.7607481923646017],
    [-0.6649416923970246, 0.7468952709129847],
    [-0.680540653066891, 0.7327103244279347],
    [-0.6958370860037717, 0.7181996586895455],
    [-0.7108241913270748, 0.7033697242732376],
    [-0.7254953066647912, 0.6882271136822209],
    [-0.7398439101151905, 0.6727785584168583],
    [-0.7538636231460657, 0.6570309259822453],
    [-0.7675482134302499, 0.6409912168353257],
    [-0.780891597616136, 0.6246665612729072],
    [-0.793887844031972, 0.6080642162619565],
    [-0.8065311753227268, 0.5911915622135866],
    [-0.8188159710183591, 0.5740560997021648],
    [-0.830736770032341, 0.5566654461310072],
    [-0.8422882730893321, 0.5390273323461351],
    [-0.8534653450809198, 0.5211495991996028],
    [-0.8642630173483832, 0.503040194063922],
    [-0.8746764898914606, 0.48470716729913704],
    [-0.8847011335021446, 0.4661586686741119],
    [-0.8943324918225493, 0.44740294374363465],
    [-0.903566283325943, 0.4284483301829307],
    [-0.9123984032200583, 0.40930325408123486],
    [-0.9208249252718379, 0.3899762261960518],
    [-0.9288421035528028, 0.3704758381697844],
    [-0.9364463741042692, 0.3508107587104008],
    [-0.9436343565216709, 0.3309897297378456],
    [-0.9504028554572863, 0.3110215624979023],
    [-0.9567488620406979, 0.2909151336452431],
    [-0.9626695552163578, 0.2706793812973939],
    [-0.9681623029976587, 0.25032330106138667],
    [-0.9732246636369604, 0.22985594203484344],
    [-0.9778543867110425, 0.2092864027832933],
    [-0.9820494141215101, 0.18862382729548938],
    [-0.9858078810097003, 0.16787740091854123],
    [-0.9891281165856873, 0.147056346274654],
    [-0.9920086448710159, 0.1261699191613066],
    [-0.9944481853548335, 0.10522740443667086],
    [-0.9964456535631284, 0.08423811189212324],
    [-0.9980001615408226, 0.06321137211366364],
    [-0.9991110182465031, 0.04215653233409717],
    [-0.9997777298596181, 0.02108295227781088],
    [-1.0, 1.2246467991473532e-16],
    [0.0, 0.5],
    [0.00022227014038189719, 0.47891704772218896],
    [0.0008889817534969424, 0.4578434676659028],
    [0.0019998384591773943, 0.43678862788633643],
    [0.0035543464368715805, 0.415761888107877],
    [0.00555181464516652, 0.3947725955633291],
    [0.007991355128984079, 0.3738300808386935],
    [0.010871883414312666, 0.3529436537253458],
    [0.014192118990299707, 0.33212259908145914],
    [0.017950585878489855, 0.3113761727045107],
    [0.022145613288957366, 0.2907135972167069],
    [0.026775336363039637, 0.2701440579651565],
    [0.03183769700234129, 0.24967669893861344],
    [0.037330444783642336, 0.2293206187026059],
    [0.04325113795930202, 0.20908486635475726],
    [0.04959714454271369, 0.18897843750209775],
    [0.056365643478329064, 0.1690102702621546],
    [0.06355362589573088, 0.14918924128959904],
    [0.07115789644719717, 0.1295241618302156],
    [0.0791750747281621, 0.11002377380394834],
    [0.0876015967799415, 0.09069674591876542],
    [0.09643371667405698, 0.07155166981706929],
    [0.10566750817745063, 0.05259705625636557],
    [0.11529886649785537, 0.03384133132588807],
    [0.12532351010853915, 0.015292832700863401],
    [0.13573698265161682, -0.003040194063921975],
    [0.14653465491908013, -0.021149599199602576],
    [0.15771172691066793, -0.03902733234613509],
    [0.16926322996765886, -0.0566654461310071],
    [0.18118402898164077, -0.07405609970216465],
    [0.193468824677273, -0.09119156221358626],
    [0.206112155968028, -0.10806421626195639],
    [0.21910840238386387, -0.1246665612729071],
    [0.23245178656975007, -0.14099121683532567],
    [0.2461363768539343, -0.15703092598224533],
    [0.2601560898848094, -0.17277855841685819],
    [0.27450469333520855, -0.18822711368222067],
    [0.28917580867292525, -0.20336972427323763],
    [0.3041629139962281, -0.21819965868954527],
    [0.31945934693310896, -0.23271032442793482],
    [0.3350583076029753, -0.24689527091298458],
    [0.35095286163947137, -0.26074819236460156],
    [0.3671359432730832, -0.27426293060119433],
    [0.38360035847215757, -0.2874334777772325],
    [0.4003387881409395, -0.3002539790539769],
    [0.41734379137320443, -0.3127187352021904],
    [0.434607808760041, -0.32482220513567506],
    [0.4521231657503132, -0.3365590083745086],
    [0.4698820760623065, -0.34792392743688383],
    [0.4878766451450449, -0.3589119101584899],
    [0.5060988736877365, -0.3695180719384028],
    [0.5245406611757882, -0.37973769791048706],
    [0.5431938094918128, -0.3895662450393438],
    [0.5620500265600203, -0.3989993441398726],
    [0.5811009300323815, -0.40803280181955115],
    [0.6003380510149178, -0.41666260234256614],
    [0.6197528378324664, -0.42488490941497004],
    [0.6393366598302445, -0.4326960678900684],
    [0.6590808112105231, -0.4400926053932799],
    [0.6789765149027036, -0.44707123386574565],
    [0.6990149264650812, -0.4536288510260056],
    [0.7191871380165539, -0.45976254174908604],
    [0.7394841821965346, -0.46546957936239064],
    [0.7598970361513051, -0.4707474268578168],
    [0.7804166255450371, -0.47559373801955673],
    [0.8010338285937002, -0.48000635846708617],
    [0.821739480120063, -0.48398332661287236],
    [0.8425243756279822, -0.48752287453437915],
    [0.8633792753941734, -0.4906234287599799],
    [0.8842949085756387, -0.49328361096842843],
    [0.9052619773309316, -0.49550223860157894],
    [0.9262711609534211, -0.49727832539008066],
    [0.9473131200147205, -0.4986110817918139],
    [0.9683785005164411, -0.4994999153428735],
    [0.9894579380484205, -0.4999444309209432],
    [1.0105420619515795, -0.4999444309209432],
    [1.0316214994835589, -0.4994999153428735],
    [1.0526868799852793, -0.4986110817918139],
    [1.073728839046579, -0.49727832539008066],
    [1.0947380226690682, -0.49550223860157905],
    [1.1157050914243611, -0.49328361096842843],
    [1.1366207246058266, -0.4906234287599799],
    [1.1574756243720177, -0.48752287453437915],
    [1.178260519879937, -0.48398332661287236],
    [1.1989661714062996, -0.48000635846708617],
    [1.219583374454963, -0.47559373801955673],
    [1.2401029638486947, -0.4707474268578168],
    [1.2605158178034652, -0.46546957936239075],
    [1.2808128619834458, -0.45976254174908604],
    [1.3009850735349187, -0.4536288510260056],
    [1.3210234850972962, -0.44707123386574577],
    [1.340919188789477, -0.4400926053932799],
    [1.3606633401697552, -0.43269606789006854],
    [1.3802471621675334, -0.42488490941497015],
    [1.3996619489850823, -0.41666260234256614],
    [1.4188990699676187, -0.40803280181955104],
    [1.4379499734399794, -0.3989993441398727],
    [1.4568061905081873, -0.3895662450393438],
    [1.4754593388242114, -0.37973769791048717],
    [1.4939011263122635, -0.3695180719384029],
    [1.512123354854955, -0.3589119101584899],
    [1.5301179239376936, -0.3479239274368837],
    [1.5478768342496867, -0.3365590083745087],
    [1.5653921912399589, -0.32482220513567517],
    [1.5826562086267957, -0.3127187352021904],
    [1.5996612118590603, -0.3002539790539771],
    [1.6163996415278423, -0.2874334777772326],
    [1.6328640567269166, -0.27426293060119455],
    [1.6490471383605283, -0.26074819236460167],
    [1.6649416923970246, -0.2468952709129847],
    [1.680540653066891, -0.2327103244279347],
    [1.6958370860037717, -0.2181996586895455],
    [1.7108241913270748, -0.20336972427323763],
    [1.7254953066647913, -0.1882271136822209],
    [1.7398439101151904, -0.1727785584168583],
    [1.7538636231460658, -0.15703092598224533],
    [1.76754821343025, -0.14099121683532567],
    [1.7808915976161361, -0.1246665612729072],
    [1.793887844031972, -0.1080642162619565],
    [1.8065311753227267, -0.0911915622135866],
    [1.8188159710183591, -0.07405609970216476],
    [1.830736770032341, -0.05666544613100721],
    [1.842288273089332, -0.03902733234613509],
    [1.8534653450809198, -0.021149599199602798],
    [1.8642630173483832, -0.003040194063921975],
    [1.8746764898914607, 0.015292832700862957],
    [1.8847011335021446, 0.033841331325888124],
    [1.8943324918225493, 0.05259705625636535],
    [1.903566283325943, 0.07155166981706929],
    [1.9123984032200583, 0.09069674591876514],
    [1.920824925271838, 0.11002377380394818],
    [1.9288421035528027, 0.1295241618302156],
    [1.9364463741042692, 0.1491892412895992],
    [1.943634356521671, 0.16901027026215443],
    [1.9504028554572863, 0.1889784375020977],
    [1.9567488620406979, 0.20908486635475693],
    [1.9626695552163578, 0.22932061870260612],
    [1.9681623029976587, 0.24967669893861333],
    [1.9732246636369604, 0.27014405796515656],
    [1.9778543867110425, 0.2907135972167067],
    [1.9820494141215101, 0.3113761727045106],
    [1.9858078810097002, 0.3321225990814588],
    [1.9891281165856873, 0.352943653725346],
    [1.992008644871016, 0.3738300808386934],
    [1.9944481853548335, 0.3947725955633291],
    [1.9964456535631285, 0.41576188810787673],
    [1.9980001615408227, 0.4367886278863364],
    [1.999111018246503, 0.45784346766590284],
    [1.999777729859618, 0.4789170477221891],
    [2.0, 0.4999999999999999],
];

/// Returns the golden reference dataset, uniformly shifted by `offset` on
/// both coordinates and divided by `downscale`.
///
/// # Errors
///
/// Returns `MoonsError::NonFiniteParameter` if `offset` or `downscale` is
/// NaN or infinite, and `MoonsError::ZeroDownscale` if `downscale` is zero.
pub fn reference_moons<F: Float>(
    offset: F,
    downscale: F,
) -> Result<Vec<DataPoint<usize, F>>, MoonsError> {
    if !offset.is_finite() || !downscale.is_finite() {
        return Err(MoonsError::NonFiniteParameter);
    }
    if downscale == F::zero() {
        return Err(MoonsError::ZeroDownscale);
    }
    let mut out = Vec::with_capacity(GOLDEN.len());
    for (i, &[x, y]) in GOLDEN.iter().enumerate() {
        let label = usize::from(i >= REFERENCE_POINTS_PER_CLASS);
        let x = (F::cast(x).unwrap() + offset) / downscale;
        let y = (F::cast(y).unwrap() + offset) / downscale;
        out.push(DataPoint::new(array![x, y], label));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity_parameters_match_the_golden_table() {
        let data = reference_moons::<f64>(0.0, 1.0).unwrap();
        assert_eq!(data.len(), 300);
        for (dp, golden) in data.iter().zip(GOLDEN.iter()) {
            assert_eq!(dp.features[0], golden[0]);
            assert_eq!(dp.features[1], golden[1]);
        }
    }

    #[test]
    fn test_class_split_is_150_per_class() {
        let data = reference_moons::<f64>(0.0, 1.0).unwrap();
        assert_eq!(data.iter().filter(|dp| dp.label == 0).count(), 150);
        assert_eq!(data.iter().filter(|dp| dp.label == 1).count(), 150);
        assert_eq!(data[0].label, 0);
        assert_eq!(data[299].label, 1);
    }

    #[test]
    fn test_offset_and_downscale_are_applied_in_order() {
        let data = reference_moons::<f64>(1.0, 2.0).unwrap();
        // First golden point is (1, 0): shift both coords by 1, then halve.
        assert_abs_diff_eq!(data[0].features[0], 1.0);
        assert_abs_diff_eq!(data[0].features[1], 0.5);
    }

    #[test]
    fn test_error_on_zero_downscale() {
        let result = reference_moons::<f64>(0.0, 0.0);
        assert!(matches!(result, Err(MoonsError::ZeroDownscale)));
    }

    #[test]
    fn test_error_on_non_finite_parameters() {
        let result = reference_moons::<f64>(f64::NAN, 1.0);
        assert!(matches!(result, Err(MoonsError::NonFiniteParameter)));
        let result = reference_moons::<f64>(0.0, f64::INFINITY);
        assert!(matches!(result, Err(MoonsError::NonFiniteParameter)));
    }
}
