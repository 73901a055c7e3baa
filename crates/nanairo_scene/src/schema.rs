//! Schema registry
//!
//! Every key and enumerated value that appears in a `.nana` scene file is
//! declared here exactly once. [`Symbol`] is the closed vocabulary; the
//! per-field enums below ([`ColorMode`], [`ToneMapping`], ...) are typed views
//! over subsets of it and serialize through the same tokens, so the document
//! model can never write a token the registry doesn't know.
//!
//! ```
//! use nanairo_scene::schema::{lookup, ColorSpace, Symbol};
//!
//! assert_eq!(Symbol::SurfaceIndex.token(), "SurfaceIndex");
//! assert_eq!(lookup("sRgbD65").unwrap(), "sRGB (D65)");
//! assert_eq!(ColorSpace::SRgbD65.to_string(), "sRGB (D65)");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SceneError};

// ============================================================================
// Symbols
// ============================================================================

macro_rules! symbols {
    ($( $(#[$meta:meta])* $variant:ident => ($name:literal, $token:literal), )+) => {
        /// Symbolic name of a registered scene token
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Symbol {
            $( $(#[$meta])* $variant, )+
        }

        impl Symbol {
            /// Every registered symbol, in declaration order
            pub const ALL: &'static [Symbol] = &[ $( Symbol::$variant, )+ ];

            /// Symbolic name, e.g. `smoothDiffuseSurface`
            pub const fn name(self) -> &'static str {
                match self {
                    $( Symbol::$variant => $name, )+
                }
            }

            /// Literal token written to scene files
            pub const fn token(self) -> &'static str {
                match self {
                    $( Symbol::$variant => $token, )+
                }
            }
        }
    };
}

symbols! {
    // Nanairo
    ProjectName => ("projectName", "Nanairo"),
    NanairoFileFormat => ("nanairoFileFormat", "nana"),
    // Menu
    CtrlKey => ("ctrlKey", "Ctrl"),

    // General
    Name => ("name", "Name"),
    Type => ("type", "Type"),
    Enabled => ("enabled", "Enabled"),
    Value => ("value", "Value"),
    Width => ("width", "Width"),
    Height => ("height", "Height"),
    Delta => ("delta", "Delta"),
    Epsilon => ("epsilon", "Epsilon"),

    // Tag
    Scene => ("scene", "Scene"),
    SceneName => ("sceneName", "SceneName"),

    // System
    System => ("system", "System"),
    NumOfThreads => ("numOfThreads", "NumOfThreads"),
    SamplerType => ("samplerType", "SamplerType"),
    CmjSampler => ("cmjSampler", "Correlated Multi-Jittered"),
    PcgSampler => ("pcgSampler", "PCG"),
    XoshiroSampler => ("xoshiroSampler", "Xoshiro"),
    SamplerSeed => ("samplerSeed", "SamplerSeed"),
    TerminationCycle => ("terminationCycle", "TerminationCycle"),
    TerminationTime => ("terminationTime", "TerminationTime"),
    ImageResolution => ("imageResolution", "ImageResolution"),
    Power2CycleSaving => ("power2CycleSaving", "Power2CycleSaving"),
    SavingIntervalCycle => ("savingIntervalCycle", "SavingIntervalCycle"),
    SavingIntervalTime => ("savingIntervalTime", "SavingIntervalTime"),

    // Color
    Color => ("color", "Color"),
    Color1 => ("color1", "Color1"),
    Color2 => ("color2", "Color2"),
    ColorMode => ("colorMode", "ColorMode"),
    Rgb => ("rgb", "RGB"),
    Spectra => ("spectra", "Spectra"),
    WavelengthSampling => ("wavelengthSampling", "WavelengthSampling"),
    RegularSampling => ("regularSampling", "Regular sampling"),
    RandomSampling => ("randomSampling", "Random sampling"),
    StratifiedSampling => ("stratifiedSampling", "Stratified sampling"),
    LightsBasedSampling => ("lightsBasedSampling", "Lights based sampling"),
    ColorSpace => ("colorSpace", "ColorSpace"),
    SRgbD65 => ("sRgbD65", "sRGB (D65)"),
    SRgbD50 => ("sRgbD50", "sRGB (D50)"),
    AdobeRgbD65 => ("adobeRgbD65", "Adobe RGB (D65)"),
    AdobeRgbD50 => ("adobeRgbD50", "Adobe RGB (D50)"),
    Gamma => ("gamma", "Gamma"),
    ToneMapping => ("toneMapping", "ToneMapping"),
    Exposure => ("exposure", "Exposure"),
    Reinhard => ("reinhard", "Reinhard"),
    ModifiedReinhard => ("modifiedReinhard", "Modified Reinhard"),
    Filmic => ("filmic", "Filmic"),
    Uncharted2Filmic => ("uncharted2Filmic", "Uncharted2 Filmic"),
    EnableDenoising => ("enableDenoising", "EnableDenoising"),
    DenoiserType => ("denoiserType", "DenoiserType"),
    BayesianCollaborativeDenoiser => ("bayesianCollaborativeDenoiser", "BayesianCollaborative"),
    HistogramBins => ("histogramBins", "HistogramBins"),
    HistogramDistanceThreshold => ("histogramDistanceThreshold", "HistogramDistanceThreshold"),
    PatchRadius => ("patchRadius", "PatchRadius"),
    SearchWindowRadius => ("searchWindowRadius", "SearchWindowRadius"),
    NumberOfScales => ("numberOfScales", "NumberOfScales"),

    // Rendering method
    RenderingMethod => ("renderingMethod", "RenderingMethod"),
    PathTracing => ("pathTracing", "PathTracing"),
    LightTracing => ("lightTracing", "LightTracing"),
    ProbabilisticPpm => ("probabilisticPpm", "ProbabilisticPpm"),
    NumOfPhotons => ("numOfPhotons", "NumOfPhotons"),
    PhotonSearchRadius => ("photonSearchRadius", "PhotonSearchRadius"),
    RadiusReductionRate => ("radiusReductionRate", "RadiusReductionRate"),
    KNearestNeighbor => ("kNearestNeighbor", "KNearestNeighbor"),
    KernelType => ("kernelType", "KernelType"),
    NoKernel => ("noKernel", "NoKernel"),
    ConeKernel => ("coneKernel", "ConeKernel"),
    PerlinKernel => ("perlinKernel", "PerlinKernel"),
    RayCastEpsilon => ("rayCastEpsilon", "RayCastEpsilon"),
    RussianRoulette => ("russianRoulette", "RussianRoulette"),
    RouletteMaxReflectance => ("rouletteMaxReflectance", "Reflectance (Max)"),
    RouletteAverageReflectance => ("rouletteAverageReflectance", "Reflectance (Average)"),
    RoulettePathLength => ("roulettePathLength", "Path length"),
    PathLength => ("pathLength", "PathLength"),
    LightPathLightSampler => ("lightPathLightSampler", "LightPathLightSampler"),
    EyePathLightSampler => ("eyePathLightSampler", "EyePathLightSampler"),
    UniformLightSampler => ("uniformLightSampler", "UniformLightSampler"),
    PowerWeightedLightSampler => ("powerWeightedLightSampler", "PowerWeightedLightSampler"),
    ContributionWeightedLightSampler => ("contributionWeightedLightSampler", "ContributionWeightedLightSampler"),

    // Texture
    TextureModel => ("textureModel", "TextureModel"),
    ValueTexture => ("valueTexture", "ValueTexture"),
    UnicolorTexture => ("unicolorTexture", "UnicolorTexture"),
    CheckerboardTexture => ("checkerboardTexture", "CheckerboardTexture"),
    ImageTexture => ("imageTexture", "ImageTexture"),
    ImageFilePath => ("imageFilePath", "ImageFilePath"),

    // Surface
    SurfaceModel => ("surfaceModel", "SurfaceModel"),
    SmoothDiffuseSurface => ("smoothDiffuseSurface", "SmoothDiffuseSurface"),
    ReflectanceIndex => ("reflectanceIndex", "ReflectanceIndex"),
    SmoothDielectricSurface => ("smoothDielectricSurface", "SmoothDielectricSurface"),
    OuterRefractiveIndex => ("outerRefractiveIndex", "OuterRefractiveIndex"),
    InnerRefractiveIndex => ("innerRefractiveIndex", "InnerRefractiveIndex"),
    SmoothConductorSurface => ("smoothConductorSurface", "SmoothConductorSurface"),
    InnerExtinction => ("innerExtinction", "InnerExtinction"),
    RoughDielectricSurface => ("roughDielectricSurface", "RoughDielectricSurface"),
    RoughnessIndex => ("roughnessIndex", "RoughnessIndex"),
    RoughConductorSurface => ("roughConductorSurface", "RoughConductorSurface"),
    LayeredDiffuseSurface => ("layeredDiffuseSurface", "LayeredDiffuseSurface"),
    ClothSurface => ("clothSurface", "ClothSurface"),
    FabricRefractiveIndex => ("fabricRefractiveIndex", "FabricRefractiveIndex"),
    IsotropicScatteringCoefficient => ("isotropicScatteringCoefficient", "IsotropicScatteringCoefficient"),
    SurfaceReflectanceGaussianWidth => ("surfaceReflectanceGaussianWidth", "SurfaceReflectanceGaussianWidth"),
    VolumeReflectanceGaussianWidth => ("volumeReflectanceGaussianWidth", "VolumeReflectanceGaussianWidth"),
    BandwidthParameter => ("bandwidthParameter", "BandwidthParameter"),

    // Emitter
    EmitterModel => ("emitterModel", "EmitterModel"),
    NonDirectionalEmitter => ("nonDirectionalEmitter", "NonDirectionalEmitter"),
    EmissiveColorIndex => ("emissiveColorIndex", "EmissiveColorIndex"),
    RadiantExitance => ("radiantExitance", "RadiantExitance"),

    // Object
    Object => ("object", "Object"),
    CameraObject => ("cameraObject", "CameraObject"),
    SingleObject => ("singleObject", "SingleObject"),
    GroupObject => ("groupObject", "GroupObject"),
    GroupLevel => ("groupLevel", "GroupLevel"),
    /// Name of the camera every scene starts with
    Camera => ("camera", "Camera"),
    /// Name of the root group every scene starts with
    World => ("world", "World"),

    // Camera
    CameraType => ("cameraType", "CameraType"),
    PinholeCamera => ("pinholeCamera", "PinholeCamera"),
    Jittering => ("jittering", "Jittering"),
    AngleOfView => ("angleOfView", "AngleOfView"),

    // Single object
    ShapeType => ("shapeType", "ShapeType"),
    PlaneObject => ("planeObject", "PlaneObject"),
    MeshObject => ("meshObject", "MeshObject"),
    ObjectFilePath => ("objectFilePath", "ObjectFilePath"),
    Smoothing => ("smoothing", "Smoothing"),
    SurfaceIndex => ("surfaceIndex", "SurfaceIndex"),
    IsEmissiveObject => ("isEmissiveObject", "IsEmissiveObject"),
    EmitterIndex => ("emitterIndex", "EmitterIndex"),

    // Transformation
    Transformation => ("transformation", "Transformation"),
    Translation => ("translation", "Translation"),
    Scaling => ("scaling", "Scaling"),
    Rotation => ("rotation", "Rotation"),
    Axis => ("axis", "Axis"),
    XAxis => ("xAxis", "X Axis"),
    YAxis => ("yAxis", "Y Axis"),
    ZAxis => ("zAxis", "Z Axis"),
    Angle => ("angle", "Angle"),
    Unit => ("unit", "Unit"),
    DegreeUnit => ("degreeUnit", "Degree"),
    RadianUnit => ("radianUnit", "Radian"),

    // BVH
    Bvh => ("bvh", "Bvh"),
    BinaryRadixTreeBvh => ("binaryRadixTreeBvh", "BinaryRadixTreeBvh"),
    ApproximateAgglomerativeClusteringBvh => ("approximateAgglomerativeClusteringBvh", "ApproximateAgglomerativeClusteringBvh"),
    AgglomerativeTreeletRestructuringBvh => ("agglomerativeTreeletRestructuringBvh", "AgglomerativeTreeletRestructuringBvh"),
    TreeletSize => ("treeletSize", "TreeletSize"),
    OptimizationLoopCount => ("optimizationLoopCount", "OptimizationLoopCount"),
}

impl Symbol {
    /// Find a symbol by its symbolic name
    pub fn from_name(name: &str) -> Option<Symbol> {
        Self::ALL.iter().copied().find(|symbol| symbol.name() == name)
    }

    /// Find a symbol by the token it writes
    pub fn from_token(token: &str) -> Option<Symbol> {
        Self::ALL.iter().copied().find(|symbol| symbol.token() == token)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Symbol {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self> {
        Symbol::from_name(s).ok_or_else(|| SceneError::UnknownSymbol(s.to_string()))
    }
}

/// Resolve a symbolic name arriving as a string to its token.
///
/// Code that names symbols statically should use [`Symbol::token`], which
/// can't fail.
pub fn lookup(symbolic_name: &str) -> Result<&'static str> {
    symbolic_name.parse::<Symbol>().map(Symbol::token)
}

// ============================================================================
// Typed token enums
// ============================================================================

macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $ty:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $symbol:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $ty {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $ty {
            /// Every value, in registry order
            pub const ALL: &'static [$ty] = &[ $( $ty::$variant, )+ ];

            /// Registry entry for this value
            pub const fn symbol(self) -> Symbol {
                match self {
                    $( $ty::$variant => Symbol::$symbol, )+
                }
            }

            /// Token written to scene files
            pub const fn token(self) -> &'static str {
                self.symbol().token()
            }

            /// Parse a scene file token
            pub fn from_token(token: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|value| value.token() == token)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.token())
            }
        }

        impl FromStr for $ty {
            type Err = SceneError;

            /// Accepts either the file token or the symbolic name.
            fn from_str(s: &str) -> Result<Self> {
                Self::from_token(s)
                    .or_else(|| Self::ALL.iter().copied().find(|value| value.symbol().name() == s))
                    .ok_or_else(|| SceneError::UnknownSymbol(s.to_string()))
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.token())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let token = String::deserialize(deserializer)?;
                Self::from_token(&token).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "unknown {} '{}', expected one of: {}",
                        stringify!($ty),
                        token,
                        Self::ALL.iter().map(|v| v.token()).collect::<Vec<_>>().join(", "),
                    ))
                })
            }
        }
    };
}

token_enum! {
    /// How colors are represented while rendering
    ColorMode {
        Rgb = Rgb,
        Spectra = Spectra,
    }
}

token_enum! {
    /// Output color space
    ColorSpace {
        SRgbD65 = SRgbD65,
        SRgbD50 = SRgbD50,
        AdobeRgbD65 = AdobeRgbD65,
        AdobeRgbD50 = AdobeRgbD50,
    }
}

token_enum! {
    /// Tone mapping operator
    ToneMapping {
        Reinhard = Reinhard,
        ModifiedReinhard = ModifiedReinhard,
        Filmic = Filmic,
        Uncharted2Filmic = Uncharted2Filmic,
    }
}

token_enum! {
    /// Wavelength sampling strategy in spectra mode
    WavelengthSampling {
        Regular = RegularSampling,
        Random = RandomSampling,
        Stratified = StratifiedSampling,
        LightsBased = LightsBasedSampling,
    }
}

token_enum! {
    /// Post process denoiser
    DenoiserType {
        BayesianCollaborative = BayesianCollaborativeDenoiser,
    }
}

token_enum! {
    /// Sampler used by the render threads
    SamplerType {
        Cmj = CmjSampler,
        Pcg = PcgSampler,
        Xoshiro = XoshiroSampler,
    }
}

token_enum! {
    /// Russian roulette termination policy
    RouletteType {
        MaxReflectance = RouletteMaxReflectance,
        AverageReflectance = RouletteAverageReflectance,
        PathLength = RoulettePathLength,
    }
}

token_enum! {
    /// Light source selection strategy
    LightSamplerType {
        Uniform = UniformLightSampler,
        PowerWeighted = PowerWeightedLightSampler,
        ContributionWeighted = ContributionWeightedLightSampler,
    }
}

token_enum! {
    /// Photon density estimation kernel
    KernelType {
        No = NoKernel,
        Cone = ConeKernel,
        Perlin = PerlinKernel,
    }
}

token_enum! {
    /// Camera projection model
    CameraType {
        Pinhole = PinholeCamera,
    }
}

token_enum! {
    /// Geometry of a single object
    ShapeType {
        Plane = PlaneObject,
        Mesh = MeshObject,
    }
}

token_enum! {
    /// Rotation axis
    Axis {
        X = XAxis,
        Y = YAxis,
        Z = ZAxis,
    }
}

token_enum! {
    /// Angle unit of a rotation
    AngleUnit {
        Degree = DegreeUnit,
        Radian = RadianUnit,
    }
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Rgb
    }
}

impl Default for ColorSpace {
    fn default() -> Self {
        ColorSpace::SRgbD65
    }
}

impl Default for ToneMapping {
    fn default() -> Self {
        ToneMapping::Reinhard
    }
}

impl Default for WavelengthSampling {
    fn default() -> Self {
        WavelengthSampling::Regular
    }
}

impl Default for DenoiserType {
    fn default() -> Self {
        DenoiserType::BayesianCollaborative
    }
}

impl Default for SamplerType {
    fn default() -> Self {
        SamplerType::Cmj
    }
}

impl Default for RouletteType {
    fn default() -> Self {
        RouletteType::MaxReflectance
    }
}

impl Default for LightSamplerType {
    fn default() -> Self {
        LightSamplerType::PowerWeighted
    }
}

impl Default for KernelType {
    fn default() -> Self {
        KernelType::No
    }
}

impl Default for CameraType {
    fn default() -> Self {
        CameraType::Pinhole
    }
}

impl Default for ShapeType {
    fn default() -> Self {
        ShapeType::Plane
    }
}

impl Default for AngleUnit {
    fn default() -> Self {
        AngleUnit::Degree
    }
}

impl Axis {
    /// Unit vector along the axis
    pub fn unit_vector(self) -> [f64; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }
}

impl AngleUnit {
    /// Convert an angle in this unit to radians
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Degree => angle.to_radians(),
            AngleUnit::Radian => angle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_symbol_has_a_token() {
        for symbol in Symbol::ALL {
            assert!(!symbol.token().is_empty(), "{} has an empty token", symbol.name());
            assert_eq!(lookup(symbol.name()).unwrap(), symbol.token());
        }
    }

    #[test]
    fn test_tokens_are_distinct() {
        let mut tokens = HashSet::new();
        for symbol in Symbol::ALL {
            assert!(tokens.insert(symbol.token()), "token '{}' is aliased", symbol.token());
        }
    }

    #[test]
    fn test_names_are_distinct() {
        let names: HashSet<_> = Symbol::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), Symbol::ALL.len());
    }

    #[test]
    fn test_lookup_unknown() {
        let err = lookup("fluorescentSurface").unwrap_err();
        assert!(matches!(err, SceneError::UnknownSymbol(ref name) if name == "fluorescentSurface"));
    }

    #[test]
    fn test_lookup_is_by_name_not_token() {
        assert!(lookup("SurfaceIndex").is_err());
        assert_eq!(lookup("surfaceIndex").unwrap(), "SurfaceIndex");
    }

    #[test]
    fn test_token_enum_serde() {
        let json = serde_json::to_string(&ToneMapping::Uncharted2Filmic).unwrap();
        assert_eq!(json, "\"Uncharted2 Filmic\"");

        let space: ColorSpace = serde_json::from_str("\"sRGB (D50)\"").unwrap();
        assert_eq!(space, ColorSpace::SRgbD50);

        let err = serde_json::from_str::<Axis>("\"W Axis\"").unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn test_token_enum_from_str() {
        assert_eq!("X Axis".parse::<Axis>().unwrap(), Axis::X);
        assert_eq!("xAxis".parse::<Axis>().unwrap(), Axis::X);
        assert!("x".parse::<Axis>().is_err());
    }

    #[test]
    fn test_token_enums_stay_inside_registry() {
        let typed: Vec<&str> = ColorMode::ALL.iter().map(|v| v.token())
            .chain(WavelengthSampling::ALL.iter().map(|v| v.token()))
            .chain(RouletteType::ALL.iter().map(|v| v.token()))
            .chain(SamplerType::ALL.iter().map(|v| v.token()))
            .collect();
        for token in typed {
            assert!(Symbol::from_token(token).is_some());
        }
    }

    #[test]
    fn test_renderer_tokens() {
        assert_eq!(SamplerType::Pcg.token(), "PCG");
        assert_eq!(SamplerType::Xoshiro.token(), "Xoshiro");
        assert_eq!(SamplerType::Cmj.token(), "Correlated Multi-Jittered");
        assert_eq!(DenoiserType::BayesianCollaborative.token(), "BayesianCollaborative");
        assert_eq!(lookup("xoshiroSampler").unwrap(), "Xoshiro");
    }

    #[test]
    fn test_angle_units() {
        assert!((AngleUnit::Degree.to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(AngleUnit::Radian.to_radians(1.5), 1.5);
        assert_eq!(Axis::Z.unit_vector(), [0.0, 0.0, 1.0]);
    }
}
