// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Assumes both vectors are sorted. Calls `on_match` for each element
// common to both, in ascending order.
pub fn intersection_with<T, F>(a: &[T], b: &[T], mut on_match: F) -> Vec<T>
where
    T: Ord + Copy,
    F: FnMut(T),
{
    let mut c: Vec<T> = Vec::with_capacity(a.len().min(b.len()));
    let mut ap = 0;
    let mut bp = 0;
    while ap < a.len() && bp < b.len() {
        if a[ap] < b[bp] {
            ap += 1;
        } else if b[bp] < a[ap] {
            bp += 1;
        } else {
            on_match(a[ap]);
            c.push(a[ap]);
            ap += 1;
            bp += 1;
        }
    }
    c
}

// The items of `a` followed by the last item of `b`.
pub fn extend_with_last<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Copy,
{
    let mut c: Vec<T> = Vec::with_capacity(a.len() + 1);
    c.extend_from_slice(a);
    c.extend(b.last().cloned());
    c
}
