//! SBI Types
//!
//! Core enumerations for the Nnrf service: NF types, NF status values and
//! URI schemes as defined in 3GPP TS 29.510.

use std::fmt;

/// NF Type enumeration - the closed set of network function type tokens
/// accepted by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NfType {
    Nrf,
    Udm,
    Amf,
    Smf,
    Ausf,
    Nef,
    Pcf,
    Smsf,
    Nssf,
    Udr,
    Lmf,
    Gmlc,
    FiveGEir,
    Sepp,
    Upf,
    N3iwf,
    Af,
    Udsf,
    Bsf,
    Chf,
    Nwdaf,
    Pcscf,
    Cbcf,
    Ucmf,
    Hss,
    SorAf,
    Spaf,
    Mme,
    Scsas,
    Scef,
    Scp,
    Nssaaf,
    Icscf,
    Scscf,
    Dra,
    ImsAs,
    Aanf,
    FiveGDdnmf,
    Nsacf,
    Mfaf,
    Easdf,
    Dccf,
    MbSmf,
    Tsctsf,
    Adrf,
    GbaBsf,
    Cef,
    MbUpf,
    Nswof,
    Pkmf,
    Mnpf,
    SmsGmsc,
    SmsIwmsc,
    Mbsf,
    Mbstf,
    Panf,
    IpSmGw,
    SmsRouter,
    Dcsf,
    Mrf,
    Mrfp,
    Mf,
    Slpkmf,
    Rh,
}

impl NfType {
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Nrf => "NRF",
            Self::Udm => "UDM",
            Self::Amf => "AMF",
            Self::Smf => "SMF",
            Self::Ausf => "AUSF",
            Self::Nef => "NEF",
            Self::Pcf => "PCF",
            Self::Smsf => "SMSF",
            Self::Nssf => "NSSF",
            Self::Udr => "UDR",
            Self::Lmf => "LMF",
            Self::Gmlc => "GMLC",
            Self::FiveGEir => "5G_EIR",
            Self::Sepp => "SEPP",
            Self::Upf => "UPF",
            Self::N3iwf => "N3IWF",
            Self::Af => "AF",
            Self::Udsf => "UDSF",
            Self::Bsf => "BSF",
            Self::Chf => "CHF",
            Self::Nwdaf => "NWDAF",
            Self::Pcscf => "PCSCF",
            Self::Cbcf => "CBCF",
            Self::Ucmf => "UCMF",
            Self::Hss => "HSS",
            Self::SorAf => "SOR_AF",
            Self::Spaf => "SPAF",
            Self::Mme => "MME",
            Self::Scsas => "SCSAS",
            Self::Scef => "SCEF",
            Self::Scp => "SCP",
            Self::Nssaaf => "NSSAAF",
            Self::Icscf => "ICSCF",
            Self::Scscf => "SCSCF",
            Self::Dra => "DRA",
            Self::ImsAs => "IMS_AS",
            Self::Aanf => "AANF",
            Self::FiveGDdnmf => "5G_DDNMF",
            Self::Nsacf => "NSACF",
            Self::Mfaf => "MFAF",
            Self::Easdf => "EASDF",
            Self::Dccf => "DCCF",
            Self::MbSmf => "MB_SMF",
            Self::Tsctsf => "TSCTSF",
            Self::Adrf => "ADRF",
            Self::GbaBsf => "GBA_BSF",
            Self::Cef => "CEF",
            Self::MbUpf => "MB_UPF",
            Self::Nswof => "NSWOF",
            Self::Pkmf => "PKMF",
            Self::Mnpf => "MNPF",
            Self::SmsGmsc => "SMS_GMSC",
            Self::SmsIwmsc => "SMS_IWMSC",
            Self::Mbsf => "MBSF",
            Self::Mbstf => "MBSTF",
            Self::Panf => "PANF",
            Self::IpSmGw => "IP_SM_GW",
            Self::SmsRouter => "SMS_ROUTER",
            Self::Dcsf => "DCSF",
            Self::Mrf => "MRF",
            Self::Mrfp => "MRFP",
            Self::Mf => "MF",
            Self::Slpkmf => "SLPKMF",
            Self::Rh => "RH",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "NRF" => Some(Self::Nrf),
            "UDM" => Some(Self::Udm),
            "AMF" => Some(Self::Amf),
            "SMF" => Some(Self::Smf),
            "AUSF" => Some(Self::Ausf),
            "NEF" => Some(Self::Nef),
            "PCF" => Some(Self::Pcf),
            "SMSF" => Some(Self::Smsf),
            "NSSF" => Some(Self::Nssf),
            "UDR" => Some(Self::Udr),
            "LMF" => Some(Self::Lmf),
            "GMLC" => Some(Self::Gmlc),
            "5G_EIR" => Some(Self::FiveGEir),
            "SEPP" => Some(Self::Sepp),
            "UPF" => Some(Self::Upf),
            "N3IWF" => Some(Self::N3iwf),
            "AF" => Some(Self::Af),
            "UDSF" => Some(Self::Udsf),
            "BSF" => Some(Self::Bsf),
            "CHF" => Some(Self::Chf),
            "NWDAF" => Some(Self::Nwdaf),
            "PCSCF" => Some(Self::Pcscf),
            "CBCF" => Some(Self::Cbcf),
            "UCMF" => Some(Self::Ucmf),
            "HSS" => Some(Self::Hss),
            "SOR_AF" => Some(Self::SorAf),
            "SPAF" => Some(Self::Spaf),
            "MME" => Some(Self::Mme),
            "SCSAS" => Some(Self::Scsas),
            "SCEF" => Some(Self::Scef),
            "SCP" => Some(Self::Scp),
            "NSSAAF" => Some(Self::Nssaaf),
            "ICSCF" => Some(Self::Icscf),
            "SCSCF" => Some(Self::Scscf),
            "DRA" => Some(Self::Dra),
            "IMS_AS" => Some(Self::ImsAs),
            "AANF" => Some(Self::Aanf),
            "5G_DDNMF" => Some(Self::FiveGDdnmf),
            "NSACF" => Some(Self::Nsacf),
            "MFAF" => Some(Self::Mfaf),
            "EASDF" => Some(Self::Easdf),
            "DCCF" => Some(Self::Dccf),
            "MB_SMF" => Some(Self::MbSmf),
            "TSCTSF" => Some(Self::Tsctsf),
            "ADRF" => Some(Self::Adrf),
            "GBA_BSF" => Some(Self::GbaBsf),
            "CEF" => Some(Self::Cef),
            "MB_UPF" => Some(Self::MbUpf),
            "NSWOF" => Some(Self::Nswof),
            "PKMF" => Some(Self::Pkmf),
            "MNPF" => Some(Self::Mnpf),
            "SMS_GMSC" => Some(Self::SmsGmsc),
            "SMS_IWMSC" => Some(Self::SmsIwmsc),
            "MBSF" => Some(Self::Mbsf),
            "MBSTF" => Some(Self::Mbstf),
            "PANF" => Some(Self::Panf),
            "IP_SM_GW" => Some(Self::IpSmGw),
            "SMS_ROUTER" => Some(Self::SmsRouter),
            "DCSF" => Some(Self::Dcsf),
            "MRF" => Some(Self::Mrf),
            "MRFP" => Some(Self::Mrfp),
            "MF" => Some(Self::Mf),
            "SLPKMF" => Some(Self::Slpkmf),
            "RH" => Some(Self::Rh),
            _ => None,
        }
    }
}

impl fmt::Display for NfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// NF Status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NfStatus {
    Registered,
    Suspended,
    Undiscoverable,
    CanaryRelease,
}

impl NfStatus {
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Registered => "REGISTERED",
            Self::Suspended => "SUSPENDED",
            Self::Undiscoverable => "UNDISCOVERABLE",
            Self::CanaryRelease => "CANARY_RELEASE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "REGISTERED" => Some(Self::Registered),
            "SUSPENDED" => Some(Self::Suspended),
            "UNDISCOVERABLE" => Some(Self::Undiscoverable),
            "CANARY_RELEASE" => Some(Self::CanaryRelease),
            _ => None,
        }
    }
}

impl fmt::Display for NfStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// URI Scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UriScheme {
    #[default]
    Http,
    Https,
}

impl UriScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}

impl fmt::Display for UriScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
