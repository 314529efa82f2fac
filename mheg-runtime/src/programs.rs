// MHEG - mheg-runtime
// Module: Resident programs
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Resident programs: built-in procedures that applications run with Call
//! and Fork.
//!
//! Programs are looked up by short or long name in [`RESIDENT_PROGRAMS`].
//! Each one checks its own parameter signature and writes its outputs
//! through the indirect references among its parameters.
//!
//! Dates are days since 17 Nov 1858 plus seconds since midnight, both in
//! local time.

use chrono::{DateTime, Datelike, Local, NaiveDateTime, Timelike};
use mheg_error::{codes, kinds, Error, ErrorCategory, Result};
use mheg_foundation::{
    ContentReference, EventType, ExternalReference, Generic, GenericValue, GroupId, ObjectReference, OctetString,
    VariableType,
};

use crate::engine::Engine;
use crate::object::{MhegObject, ObjectBody};
use crate::registry::ObjectId;

/// Days between the MJD epoch (17 Nov 1858) and the Unix epoch
pub const MJD_UNIX_EPOCH: i64 = 40_587;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

type ProgramFn = fn(&mut Engine, &[GenericValue], &GroupId) -> Result<()>;

/// Entry of the resident program table
#[derive(Clone, Copy)]
pub struct ResidentProgram {
    /// Three-letter name
    pub short_name: &'static str,
    /// Descriptive name
    pub long_name:  &'static str,
    run:            Option<ProgramFn>,
}

impl ResidentProgram {
    const fn new(short_name: &'static str, long_name: &'static str, run: ProgramFn) -> Self {
        Self { short_name, long_name, run: Some(run) }
    }

    const fn unimplemented(short_name: &'static str, long_name: &'static str) -> Self {
        Self { short_name, long_name, run: None }
    }

    /// True if this receiver runs the program
    pub const fn is_implemented(&self) -> bool {
        self.run.is_some()
    }

    fn matches(&self, name: &OctetString) -> bool {
        name.as_bytes() == self.short_name.as_bytes() || name.as_bytes() == self.long_name.as_bytes()
    }
}

impl core::fmt::Debug for ResidentProgram {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResidentProgram")
            .field("short_name", &self.short_name)
            .field("long_name", &self.long_name)
            .field("implemented", &self.is_implemented())
            .finish()
    }
}

/// Programs known to the engine
pub const RESIDENT_PROGRAMS: &[ResidentProgram] = &[
    ResidentProgram::new("GCD", "GetCurrentDate", Engine::get_current_date),
    ResidentProgram::new("FDa", "FormatDate", Engine::format_date),
    ResidentProgram::new("GDW", "GetDayOfWeek", Engine::get_day_of_week),
    ResidentProgram::new("Rnd", "Random", Engine::random),
    ResidentProgram::new("CTC", "CastToContentRef", Engine::cast_to_content_ref),
    ResidentProgram::new("CTO", "CastToObjectRef", Engine::cast_to_object_ref),
    ResidentProgram::new("GSL", "GetStringLength", Engine::get_string_length),
    ResidentProgram::new("GSS", "GetSubString", Engine::get_sub_string),
    ResidentProgram::new("SSS", "SearchSubString", Engine::search_sub_string),
    ResidentProgram::new("SES", "SearchAndExtractSubString", Engine::search_and_extract_sub_string),
    ResidentProgram::unimplemented("GSI", "SI_GetServiceIndex"),
    ResidentProgram::unimplemented("TIn", "SI_TuneIndex"),
    ResidentProgram::unimplemented("TII", "SI_TuneIndexInfo"),
    ResidentProgram::unimplemented("BSI", "SI_GetBasicSI"),
    ResidentProgram::unimplemented("GBI", "GetBootInfo"),
    ResidentProgram::new("CCR", "CheckContentRef", Engine::check_content_ref),
    ResidentProgram::unimplemented("CGR", "CheckGroupIDRef"),
    ResidentProgram::unimplemented("VTG", "VideoToGraphics"),
    ResidentProgram::unimplemented("SWA", "SetWidescreenAlignment"),
    ResidentProgram::unimplemented("GDA", "GetDisplayAspectRatio"),
    ResidentProgram::unimplemented("CIS", "CI_SendMessage"),
    ResidentProgram::unimplemented("SSM", "SetSubtitleMode"),
    ResidentProgram::new("WAI", "WhoAmI", Engine::who_am_i),
    ResidentProgram::new("DBG", "Debug", Engine::debug),
];

/// Look a program up by short or long name
pub fn find_resident_program(name: &OctetString) -> Option<&'static ResidentProgram> {
    RESIDENT_PROGRAMS.iter().find(|program| program.matches(name))
}

const SIGNATURE_MISMATCH: Error =
    Error::parameter_error(codes::PROGRAM_SIGNATURE_MISMATCH, "Wrong number or kind of program parameters");

impl Engine {
    /// Call or Fork: run the program `id` with `params`.
    ///
    /// The program is prepared if needed, activated, run, and deactivated
    /// again; `succeeded` receives whether it ran. A forked run also queues
    /// AsynchStopped. Calling a program that is already running does
    /// nothing.
    pub(crate) fn call_program(
        &mut self,
        id: ObjectId,
        succeeded: &ObjectReference,
        params: &[GenericValue],
        caller_group: &GroupId,
        fork: bool,
    ) -> Result<()> {
        let object = self.registry.get(id).ok_or_else(kinds::stale_handle)?;
        let ObjectBody::Program(program) = &object.body else { return Err(Error::UNEXPECTED_TARGET) };
        let name = program.name.clone();
        let address = object.root.address.clone();
        if object.is_running() {
            self.logger.debug(&address, "Program already running");
            return Ok(());
        }
        if !object.is_available() {
            self.prepare(id);
        }

        self.logger.debug(&address, format!("{} {name}", if fork { "Fork" } else { "Call" }));
        self.activate(id);
        if let Some(ObjectBody::Program(program)) = self.registry.get_mut(id).map(|object| &mut object.body) {
            program.forked = fork;
        }
        let result = self.run_program(&name, params, caller_group);
        self.set_output(succeeded, caller_group, result.is_ok());
        self.deactivate(id);
        if fork && self.registry.get(id).is_some_and(MhegObject::is_available) {
            self.raise_async(id, EventType::AsynchStopped, None);
        }
        result
    }

    fn run_program(&mut self, name: &OctetString, params: &[GenericValue], caller_group: &GroupId) -> Result<()> {
        let program = find_resident_program(name)
            .ok_or(Error::new(ErrorCategory::NotImplemented, codes::UNKNOWN_PROGRAM, "Unknown resident program"))?;
        let run = program.run.ok_or(Error::new(
            ErrorCategory::NotImplemented,
            codes::UNIMPLEMENTED_PROGRAM,
            "Resident program is not supported by this receiver",
        ))?;
        run(self, params, caller_group)
    }

    /// Store a program output; literal parameters have nowhere to go
    fn output<T: VariableType>(&mut self, param: &Generic<T>, caller_group: &GroupId, value: T) {
        match param {
            Generic::Indirect(reference) => {
                self.set_output(reference, caller_group, value);
            }
            Generic::Literal(_) => self.logger.debug(caller_group, "Literal output parameter ignored"),
        }
    }

    fn local_now(&self) -> NaiveDateTime {
        self.config.fixed_date_time.unwrap_or_else(|| Local::now().naive_local())
    }

    fn next_random(&mut self) -> u64 {
        // xorshift64
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng_state = x;
        x
    }

    // ---------------------------------------------------------------------
    // Dates

    fn get_current_date(&mut self, params: &[GenericValue], gid: &GroupId) -> Result<()> {
        let [GenericValue::Integer(date), GenericValue::Integer(time)] = params else {
            return Err(SIGNATURE_MISMATCH);
        };
        let (days, seconds) = mjd_from_local(self.local_now());
        self.output(date, gid, days);
        self.output(time, gid, seconds);
        Ok(())
    }

    fn format_date(&mut self, params: &[GenericValue], gid: &GroupId) -> Result<()> {
        let [
            GenericValue::OctetString(format),
            GenericValue::Integer(date),
            GenericValue::Integer(time),
            GenericValue::OctetString(result),
        ] = params
        else {
            return Err(SIGNATURE_MISMATCH);
        };
        let format = self.get(format, gid);
        let at = local_from_mjd(self.get(date, gid), self.get(time, gid))
            .ok_or(Error::parameter_error(codes::INVALID_INDEX, "Date out of range"))?;
        let (text, unknown) = format_mheg_date(&format, at);
        for directive in unknown {
            self.logger.debug(gid, format!("Unknown date format character '{}'", char::from(directive)));
        }
        self.output(result, gid, text);
        Ok(())
    }

    fn get_day_of_week(&mut self, params: &[GenericValue], gid: &GroupId) -> Result<()> {
        let [GenericValue::Integer(date), GenericValue::Integer(day)] = params else {
            return Err(SIGNATURE_MISMATCH);
        };
        // 17 Nov 1858 was a Wednesday; 0 is Sunday
        let weekday = (i64::from(self.get(date, gid)) + 3).rem_euclid(7);
        self.output(day, gid, i32::try_from(weekday).unwrap_or(0));
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Numbers and references

    fn random(&mut self, params: &[GenericValue], gid: &GroupId) -> Result<()> {
        let [GenericValue::Integer(num), GenericValue::Integer(result)] = params else {
            return Err(SIGNATURE_MISMATCH);
        };
        let num = self.get(num, gid);
        // 1..=num; Random(0) is used in the wild and answers 1
        let value = match u64::try_from(num) {
            Ok(n) if n > 0 => 1 + i32::try_from(self.next_random() % n).unwrap_or(0),
            _ => 1,
        };
        self.output(result, gid, value);
        Ok(())
    }

    fn cast_to_content_ref(&mut self, params: &[GenericValue], gid: &GroupId) -> Result<()> {
        let [GenericValue::OctetString(string), GenericValue::ContentReference(result)] = params else {
            return Err(SIGNATURE_MISMATCH);
        };
        let reference = ContentReference::new(self.get(string, gid));
        self.output(result, gid, reference);
        Ok(())
    }

    fn cast_to_object_ref(&mut self, params: &[GenericValue], gid: &GroupId) -> Result<()> {
        let [GenericValue::OctetString(group), GenericValue::Integer(number), GenericValue::ObjectReference(result)] =
            params
        else {
            return Err(SIGNATURE_MISMATCH);
        };
        // only external references can be made
        let reference = ObjectReference::External(ExternalReference::new(self.get(group, gid), self.get(number, gid)));
        self.output(result, gid, reference);
        Ok(())
    }

    fn check_content_ref(&mut self, params: &[GenericValue], gid: &GroupId) -> Result<()> {
        let [
            GenericValue::ContentReference(reference),
            GenericValue::Boolean(valid),
            GenericValue::ContentReference(checked),
        ] = params
        else {
            return Err(SIGNATURE_MISMATCH);
        };
        let reference = self.get(reference, gid);
        let exists = self.loader.check_content(&reference);
        self.output(valid, gid, exists);
        self.output(checked, gid, reference);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Strings

    fn get_string_length(&mut self, params: &[GenericValue], gid: &GroupId) -> Result<()> {
        let [GenericValue::OctetString(string), GenericValue::Integer(length)] = params else {
            return Err(SIGNATURE_MISMATCH);
        };
        let len = self.get(string, gid).len();
        self.output(length, gid, i32::try_from(len).unwrap_or(i32::MAX));
        Ok(())
    }

    fn get_sub_string(&mut self, params: &[GenericValue], gid: &GroupId) -> Result<()> {
        let [
            GenericValue::OctetString(string),
            GenericValue::Integer(begin),
            GenericValue::Integer(end),
            GenericValue::OctetString(result),
        ] = params
        else {
            return Err(SIGNATURE_MISMATCH);
        };
        let string = self.get(string, gid);
        let extract = sub_string(&string, self.get(begin, gid), self.get(end, gid));
        self.output(result, gid, extract);
        Ok(())
    }

    fn search_sub_string(&mut self, params: &[GenericValue], gid: &GroupId) -> Result<()> {
        let [
            GenericValue::OctetString(string),
            GenericValue::Integer(start),
            GenericValue::OctetString(search),
            GenericValue::Integer(position),
        ] = params
        else {
            return Err(SIGNATURE_MISMATCH);
        };
        let string = self.get(string, gid);
        let start = clamp_start(self.get(start, gid), &string);
        let found = string.find_from(start, &self.get(search, gid));
        self.output(position, gid, found.and_then(|p| i32::try_from(p).ok()).unwrap_or(-1));
        Ok(())
    }

    fn search_and_extract_sub_string(&mut self, params: &[GenericValue], gid: &GroupId) -> Result<()> {
        let [
            GenericValue::OctetString(string),
            GenericValue::Integer(start),
            GenericValue::OctetString(search),
            GenericValue::OctetString(result),
            GenericValue::Integer(position),
        ] = params
        else {
            return Err(SIGNATURE_MISMATCH);
        };
        let string = self.get(string, gid);
        let search = self.get(search, gid);
        let start = clamp_start(self.get(start, gid), &string);
        let (extract, next) = match string.find_from(start, &search) {
            // the text between start and the match; position is just past it
            Some(found) => (
                string.slice(start - 1, found - 1),
                i32::try_from(found + search.len()).unwrap_or(-1),
            ),
            None => (OctetString::new(), -1),
        };
        self.output(result, gid, extract);
        self.output(position, gid, next);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Receiver

    fn who_am_i(&mut self, params: &[GenericValue], gid: &GroupId) -> Result<()> {
        let [GenericValue::OctetString(identity)] = params else {
            return Err(SIGNATURE_MISMATCH);
        };
        let receiver = OctetString::from(self.config.receiver_identity.as_str());
        self.output(identity, gid, receiver);
        Ok(())
    }

    fn debug(&mut self, params: &[GenericValue], gid: &GroupId) -> Result<()> {
        let rendered: Vec<String> = params
            .iter()
            .map(|param| self.resolve_value(param, gid).map_or_else(|| String::from("<unresolved>"), |v| v.to_string()))
            .collect();
        self.logger.info(gid, format!("Debug: {}", rendered.join(", ")));
        Ok(())
    }
}

/// Local date-time as MJD day number and seconds since midnight
pub fn mjd_from_local(at: NaiveDateTime) -> (i32, i32) {
    let seconds = at.and_utc().timestamp();
    let days = seconds.div_euclid(SECONDS_PER_DAY) + MJD_UNIX_EPOCH;
    let time = seconds.rem_euclid(SECONDS_PER_DAY);
    (i32::try_from(days).unwrap_or(i32::MAX), i32::try_from(time).unwrap_or(0))
}

/// Inverse of [`mjd_from_local`]; `None` outside chrono's range
pub fn local_from_mjd(days: i32, seconds: i32) -> Option<NaiveDateTime> {
    let timestamp = (i64::from(days) - MJD_UNIX_EPOCH) * SECONDS_PER_DAY + i64::from(seconds);
    DateTime::from_timestamp(timestamp, 0).map(|at| at.naive_utc())
}

/// Expand the `%` directives of a FormatDate format.
///
/// Returns the text and the directive characters that were not
/// understood, which are dropped from the output.
pub fn format_mheg_date(format: &OctetString, at: NaiveDateTime) -> (OctetString, Vec<u8>) {
    let hour12 = match at.hour() % 12 {
        0 => 12,
        h => h,
    };
    let mut out: Vec<u8> = Vec::with_capacity(format.len());
    let mut unknown = Vec::new();
    let mut bytes = format.as_bytes().iter().copied();
    while let Some(b) = bytes.next() {
        if b != b'%' {
            out.push(b);
            continue;
        }
        let Some(directive) = bytes.next() else {
            // a trailing % is copied as is
            out.push(b);
            break;
        };
        let field = match directive {
            b'Y' => at.year().to_string(),
            b'y' => format!("{:02}", at.year().rem_euclid(100)),
            b'X' => format!("{:02}", at.month()),
            b'x' => at.month().to_string(),
            b'D' => format!("{:02}", at.day()),
            b'd' => at.day().to_string(),
            b'H' => format!("{:02}", at.hour()),
            b'h' => at.hour().to_string(),
            b'I' => format!("{hour12:02}"),
            b'i' => hour12.to_string(),
            b'M' => format!("{:02}", at.minute()),
            b'm' => at.minute().to_string(),
            b'S' => format!("{:02}", at.second()),
            b's' => at.second().to_string(),
            b'A' => String::from(if at.hour() < 12 { "AM" } else { "PM" }),
            b'a' => String::from(if at.hour() < 12 { "am" } else { "pm" }),
            b'%' => String::from("%"),
            other => {
                unknown.push(other);
                continue;
            }
        };
        out.extend_from_slice(field.as_bytes());
    }
    (OctetString::from(out), unknown)
}

/// GetSubString: octets `begin..=end`, 1-based, clamped to the string
fn sub_string(string: &OctetString, begin: i32, end: i32) -> OctetString {
    let begin = usize::try_from(begin.max(1)).unwrap_or(1);
    let end = usize::try_from(end).unwrap_or(0).min(string.len());
    if begin > end { OctetString::new() } else { string.slice(begin - 1, end) }
}

/// Search start clamped to `1..=len`
fn clamp_start(start: i32, string: &OctetString) -> usize {
    usize::try_from(start.max(1)).unwrap_or(1).min(string.len().max(1))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mheg_foundation::{Generic, VariableValue};
    use mheg_instructions::{ActionKind, ElementaryAction};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::EngineConfig;
    use crate::content::MemoryContentLoader;
    use crate::descriptor::{GroupDescriptor, ItemDescriptor};
    use crate::object::{ProgramState, VariableState};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).and_then(|date| date.and_hms_opt(h, mi, s)).unwrap()
    }

    #[test]
    fn test_mjd_round_trip() {
        let noon = at(2025, 3, 14, 12, 30, 5);
        let (days, seconds) = mjd_from_local(noon);
        assert_eq!((days, seconds), (60_748, 45_005));
        assert_eq!(local_from_mjd(days, seconds), Some(noon));
        assert_eq!(mjd_from_local(at(1858, 11, 17, 0, 0, 0)), (0, 0));
    }

    #[test]
    fn test_format_directives() {
        let (text, unknown) = format_mheg_date(&"%D/%X/%Y %i:%M%a %q 100%%".into(), at(2025, 3, 4, 0, 7, 0));
        assert_eq!(text, OctetString::from("04/03/2025 12:07am  100%"));
        assert_eq!(unknown, vec![b'q']);
        let (text, _) = format_mheg_date(&"%y-%x-%d %H%".into(), at(2009, 1, 2, 23, 0, 0));
        assert_eq!(text, OctetString::from("09-1-2 23%"));
    }

    #[test]
    fn test_sub_string_clamps() {
        let s = OctetString::from("abcdef");
        assert_eq!(sub_string(&s, 2, 4), OctetString::from("bcd"));
        assert_eq!(sub_string(&s, -5, 99), s);
        assert_eq!(sub_string(&s, 5, 2), OctetString::new());
    }

    #[test]
    fn test_unimplemented_programs_are_listed() {
        let name = OctetString::from("SI_TuneIndex");
        assert!(find_resident_program(&name).is_some_and(|p| !p.is_implemented()));
        assert!(find_resident_program(&"GSL".into()).is_some_and(ResidentProgram::is_implemented));
        assert!(find_resident_program(&"XYZ".into()).is_none());
    }

    fn engine(program: &str, vars: &[VariableValue]) -> Engine {
        // the success flag starts true so that a failed call shows up
        let mut app = GroupDescriptor::application("~//a")
            .with_item(ItemDescriptor::new(1, ObjectBody::Program(ProgramState::resident(program))).inactive())
            .with_item(ItemDescriptor::new(2, ObjectBody::Variable(VariableState::new(VariableValue::Boolean(true)))));
        for (n, value) in (10..).zip(vars) {
            app = app.with_item(ItemDescriptor::new(n, ObjectBody::Variable(VariableState::new(value.clone()))));
        }
        let config = EngineConfig::default().with_fixed_date_time(at(2025, 3, 14, 12, 30, 5));
        let loader = MemoryContentLoader::new().with_content("/a.png", "png");
        let mut engine = Engine::new(config).with_content_loader(loader);
        engine.load_application(app).unwrap();
        engine.clear_history();
        engine
    }

    fn out<T>(n: i32) -> Generic<T> {
        Generic::Indirect(ObjectReference::Internal(n))
    }

    fn call(engine: &mut Engine, parameters: Vec<GenericValue>, fork: bool) {
        let kind = if fork {
            ActionKind::Fork { fork_succeeded: ObjectReference::Internal(2), parameters }
        } else {
            ActionKind::Call { call_succeeded: ObjectReference::Internal(2), parameters }
        };
        engine.run_actions(&[ElementaryAction::new(ObjectReference::Internal(1), kind)], &GroupId::from("~//a"));
    }

    fn value(engine: &Engine, n: i32) -> VariableValue {
        let id = engine.lookup(&ExternalReference::new("~//a", n)).unwrap();
        engine.object(id).and_then(MhegObject::variable).map(|v| v.value.clone()).unwrap()
    }

    #[test]
    fn test_call_current_date_and_success_flag() {
        let mut engine = engine("GCD", &[VariableValue::Integer(0), VariableValue::Integer(0)]);
        call(&mut engine, vec![GenericValue::Integer(out(10)), GenericValue::Integer(out(11))], false);
        assert_eq!(value(&engine, 10), VariableValue::Integer(60_748));
        assert_eq!(value(&engine, 11), VariableValue::Integer(45_005));
        assert_eq!(value(&engine, 2), VariableValue::Boolean(true));
        let program = engine.lookup(&ExternalReference::new("~//a", 1)).unwrap();
        assert!(!engine.object(program).unwrap().is_running());
    }

    #[test]
    fn test_signature_mismatch_reports_failure() {
        let mut engine = engine("GSL", &[VariableValue::Integer(0)]);
        call(&mut engine, vec![GenericValue::Integer(out(10))], false);
        assert_eq!(value(&engine, 2), VariableValue::Boolean(false));
    }

    #[test]
    fn test_search_and_extract() {
        let vars = [VariableValue::OctetString(OctetString::new()), VariableValue::Integer(0)];
        let mut engine = engine("SearchAndExtractSubString", &vars);
        call(
            &mut engine,
            vec![
                GenericValue::OctetString(OctetString::from("key=value;rest").into()),
                GenericValue::Integer(1.into()),
                GenericValue::OctetString(OctetString::from("=").into()),
                GenericValue::OctetString(out(10)),
                GenericValue::Integer(out(11)),
            ],
            false,
        );
        assert_eq!(value(&engine, 10), VariableValue::OctetString("key".into()));
        assert_eq!(value(&engine, 11), VariableValue::Integer(5));
    }

    #[test]
    fn test_fork_queues_asynch_stopped() {
        let mut engine = engine("WAI", &[VariableValue::OctetString(OctetString::new())]);
        call(&mut engine, vec![GenericValue::OctetString(out(10))], true);
        assert_eq!(value(&engine, 10), VariableValue::OctetString(crate::config::DEFAULT_RECEIVER_IDENTITY.into()));
        assert_eq!(engine.history().last().map(|r| r.event.event_type), Some(EventType::AsynchStopped));
    }

    #[test]
    fn test_check_content_ref() {
        let vars = [VariableValue::Boolean(false), VariableValue::ContentReference(ContentReference::default())];
        let mut engine = engine("CCR", &vars);
        call(
            &mut engine,
            vec![
                GenericValue::ContentReference(ContentReference::new("/a.png").into()),
                GenericValue::Boolean(out(10)),
                GenericValue::ContentReference(out(11)),
            ],
            false,
        );
        assert_eq!(value(&engine, 10), VariableValue::Boolean(true));
        assert_eq!(value(&engine, 11), VariableValue::ContentReference(ContentReference::new("/a.png")));
    }

    #[test]
    fn test_random_stays_in_range() {
        let mut engine = engine("Rnd", &[VariableValue::Integer(0)]);
        for _ in 0..50 {
            call(&mut engine, vec![GenericValue::Integer(6.into()), GenericValue::Integer(out(10))], false);
            let VariableValue::Integer(n) = value(&engine, 10) else { panic!("not an integer") };
            assert!((1..=6).contains(&n));
        }
    }
}
