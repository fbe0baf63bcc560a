#[cfg(test)]
mod tests {
    use crate::logic::{find_available_rooms, intervals_overlap, AvailabilityRequest, WeekdayNames};
    use chrono::{NaiveDate, NaiveTime};
    use proptest::prelude::*;
    use scheduler_common::{LectureSchedule, Room, Session};

    const DAY_NAMES: [&str; 7] = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];

    // Minutes since midnight -> time of day
    fn at(minutes: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap()
    }

    fn interval() -> impl Strategy<Value = (u32, u32)> {
        (0u32..1380, 1u32..180).prop_map(|(start, len)| (start, (start + len).min(1439)))
    }

    fn rooms(count: usize) -> Vec<Room> {
        (1..=count as i64)
            .map(|id| Room {
                id,
                name: format!("Room {}", id),
                code: format!("R{}", id),
            })
            .collect()
    }

    proptest! {
        // Disjoint intervals never overlap, in either argument order
        #[test]
        fn test_disjoint_intervals_never_conflict(
            (a_start, a_len) in (0u32..700, 1u32..60),
            gap in 0u32..60,
            b_len in 1u32..60,
        ) {
            let a_end = a_start + a_len;
            let b_start = a_end + gap;
            let b_end = b_start + b_len;
            prop_assert!(!intervals_overlap(at(a_start), at(a_end), at(b_start), at(b_end)));
            prop_assert!(!intervals_overlap(at(b_start), at(b_end), at(a_start), at(a_end)));
        }

        // Intervals sharing any open sub-interval overlap, symmetrically
        #[test]
        fn test_shared_instant_conflicts(
            (a_start, a_end) in interval(),
            (b_start, b_end) in interval(),
        ) {
            let shares = a_start.max(b_start) < a_end.min(b_end);
            prop_assert_eq!(intervals_overlap(at(a_start), at(a_end), at(b_start), at(b_end)), shares);
            prop_assert_eq!(
                intervals_overlap(at(a_start), at(a_end), at(b_start), at(b_end)),
                intervals_overlap(at(b_start), at(b_end), at(a_start), at(a_end))
            );
        }

        // The result is an order-preserving subset of the rooms, and every
        // removed room really has an overlapping booking
        #[test]
        fn test_result_is_ordered_subset(
            room_count in 1usize..8,
            bookings in prop::collection::vec((1i64..10, interval()), 0..12),
            lectures in prop::collection::vec((1i64..10, 0usize..7, interval()), 0..12),
            (req_start, req_end) in interval(),
        ) {
            let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
            let all_rooms = rooms(room_count);
            let sessions: Vec<Session> = bookings
                .iter()
                .enumerate()
                .map(|(i, (room_id, (s, e)))| Session {
                    id: i as i64 + 1,
                    date,
                    start_time: at(*s),
                    end_time: at(*e),
                    room_id: Some(*room_id),
                    student_name: None,
                })
                .collect();
            let lecture_schedules: Vec<LectureSchedule> = lectures
                .iter()
                .map(|(room_id, day, (s, e))| LectureSchedule {
                    room: format!("ROOM {}", room_id),
                    day_of_week: DAY_NAMES[*day].to_string(),
                    start_time: at(*s),
                    end_time: at(*e),
                })
                .collect();
            let request = AvailabilityRequest::new(date, at(req_start), at(req_end));

            let available = find_available_rooms(
                &all_rooms,
                &sessions,
                &lecture_schedules,
                &request,
                &WeekdayNames::ENGLISH,
            );

            let positions: Vec<Option<usize>> = available
                .iter()
                .map(|room| all_rooms.iter().position(|r| r == room))
                .collect();
            prop_assert!(positions.iter().all(Option::is_some));
            let positions: Vec<usize> = positions.into_iter().flatten().collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

            for room in &all_rooms {
                let booked_by_session = sessions.iter().any(|s| {
                    s.room_id == Some(room.id)
                        && intervals_overlap(request.start_time, request.end_time, s.start_time, s.end_time)
                });
                let booked_by_lecture = lecture_schedules.iter().any(|l| {
                    l.day_of_week == "Wednesday"
                        && room.has_name(&l.room)
                        && intervals_overlap(request.start_time, request.end_time, l.start_time, l.end_time)
                });
                let is_available = available.contains(room);
                prop_assert_eq!(is_available, !(booked_by_session || booked_by_lecture));
            }
        }
    }
}
